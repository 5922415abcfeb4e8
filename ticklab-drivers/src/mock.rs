//! Recording bus and no-op delay for driver tests

use heapless::Vec;
use embedded_hal::delay::DelayNs;
use ticklab_hal::I2cBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

/// Bus that records every write and answers reads from a script
#[derive(Default)]
pub struct MockBus {
    pub writes: Vec<(u8, Vec<u8, 8>), 512>,
    /// Bytes returned by the next reads, in order
    pub responses: Vec<u8, 16>,
    pub nack: bool,
}

impl MockBus {
    /// Single bytes written to `address`, in order
    pub fn bytes_to(&self, address: u8) -> impl Iterator<Item = u8> + '_ {
        self.writes
            .iter()
            .filter(move |(a, data)| *a == address && data.len() == 1)
            .map(|(_, data)| data[0])
    }
}

impl I2cBus for MockBus {
    type Error = Nack;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
        if self.nack {
            return Err(Nack);
        }
        let _ = self
            .writes
            .push((address, Vec::from_slice(data).unwrap_or_default()));
        Ok(())
    }

    fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), Nack> {
        if self.nack {
            return Err(Nack);
        }
        for byte in buf.iter_mut() {
            *byte = if self.responses.is_empty() {
                0
            } else {
                self.responses.remove(0)
            };
        }
        Ok(())
    }

    fn write_read(&mut self, address: u8, data: &[u8], buf: &mut [u8]) -> Result<(), Nack> {
        self.write(address, data)?;
        self.read(address, buf)
    }
}

/// Delay that only adds up the requested time
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
