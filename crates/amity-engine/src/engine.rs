use std::collections::VecDeque;

use amity_core::Address;

/// Byte-oriented contract for the external native messenger engine.
///
/// The engine owns all network, DHT, and transport-crypto behavior; this
/// trait only fixes the seam through which addresses and payload bytes
/// flow in and out of it.
pub trait MessengerEngine {
    /// Engine-specific operation error.
    type Error;

    /// Registers a bootstrap node by its advertised address.
    fn bootstrap(&mut self, node: &Address) -> Result<(), Self::Error>;
    /// Drives one step of the engine's internal event loop.
    fn iterate(&mut self);
    /// Attempts best-effort delivery of a payload to a friend.
    fn send(&mut self, recipient: &Address, payload: &[u8]) -> Result<(), Self::Error>;
    /// Returns the next inbound payload and its sender.
    fn receive(&mut self) -> Option<(Address, Vec<u8>)>;
}

/// In-memory engine double for tests and simulations.
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    bootstrap_nodes: Vec<Address>,
    inbound: VecDeque<(Address, Vec<u8>)>,
    outbound: Vec<(Address, Vec<u8>)>,
    iterations: u64,
}

impl InMemoryEngine {
    /// Queues a payload as inbound traffic from `sender`.
    pub fn enqueue_inbound(&mut self, sender: Address, payload: Vec<u8>) {
        self.inbound.push_back((sender, payload));
    }

    /// Drains and returns all outbound sends captured so far.
    pub fn take_outbound(&mut self) -> Vec<(Address, Vec<u8>)> {
        std::mem::take(&mut self.outbound)
    }

    /// Bootstrap nodes registered so far, in registration order.
    pub fn bootstrap_nodes(&self) -> &[Address] {
        &self.bootstrap_nodes
    }

    /// Number of event-loop steps driven so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

impl MessengerEngine for InMemoryEngine {
    type Error = &'static str;

    fn bootstrap(&mut self, node: &Address) -> Result<(), Self::Error> {
        self.bootstrap_nodes.push(*node);
        Ok(())
    }

    fn iterate(&mut self) {
        self.iterations += 1;
    }

    fn send(&mut self, recipient: &Address, payload: &[u8]) -> Result<(), Self::Error> {
        self.outbound.push((*recipient, payload.to_vec()));
        Ok(())
    }

    fn receive(&mut self) -> Option<(Address, Vec<u8>)> {
        self.inbound.pop_front()
    }
}
