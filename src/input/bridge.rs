use std::io::{BufReader, Read};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use super::decoder::Decoder;
use super::reader::LineReader;
use crate::error::Result;
use crate::model::MetricFamily;

pub const BRIDGE_CAPACITY: usize = 1024;

/// Bounded handoff between the decoding thread and the consumer.
///
/// The producer blocks once `capacity` families are queued. The bridge closes
/// when decoding ends, successfully or not; decode errors are logged by the
/// producer and never reach the consumer.
pub struct FamilyBridge {
    receiver: Receiver<MetricFamily>,
    producer: Option<JoinHandle<()>>,
}

impl FamilyBridge {
    pub fn spawn<R: Read + Send + 'static>(input: R) -> Self {
        Self::with_capacity(input, BRIDGE_CAPACITY)
    }

    pub fn with_capacity<R: Read + Send + 'static>(input: R, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::sync_channel(capacity);

        let producer = thread::spawn(move || {
            let decoder = Decoder::new(Box::new(LineReader::new(BufReader::new(input))));
            if let Err(err) = produce(decoder, &sender) {
                tracing::debug!(error = %err, "prometheus exposition decoding failed");
            }
            // Dropping the sender closes the bridge.
        });

        Self {
            receiver,
            producer: Some(producer),
        }
    }
}

fn produce(decoder: Decoder, sender: &SyncSender<MetricFamily>) -> Result<()> {
    for family in decoder {
        if sender.send(family?).is_err() {
            // Nobody is listening anymore.
            break;
        }
    }
    Ok(())
}

impl std::iter::Iterator for FamilyBridge {
    type Item = MetricFamily;

    fn next(&mut self) -> Option<Self::Item> {
        match self.receiver.recv() {
            Ok(family) => Some(family),
            Err(_) => {
                if let Some(producer) = self.producer.take() {
                    if producer.join().is_err() {
                        tracing::warn!("exposition decoding thread panicked");
                    }
                }
                None
            }
        }
    }
}
