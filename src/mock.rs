//! Recording bus and delay for the driver tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Write(u8, Vec<u8>),
    DelayNs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Bus writes of the log, one entry per transaction.
pub fn writes(log: &Log) -> Vec<Vec<u8>> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Write(_, bytes) => Some(bytes.clone()),
            _ => None,
        })
        .collect()
}

pub struct MockI2c {
    log: Log,
    /// Transactions left before the bus stops acknowledging.
    fail_after: Option<usize>,
}

impl MockI2c {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            fail_after: None,
        }
    }

    pub fn failing_after(log: Log, transactions: usize) -> Self {
        Self {
            log,
            fail_after: Some(transactions),
        }
    }

    fn record(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        if let Some(left) = self.fail_after.as_mut() {
            if *left == 0 {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            *left -= 1;
        }
        let mut bytes = Vec::new();
        for op in operations.iter() {
            match op {
                Operation::Write(data) => bytes.extend_from_slice(data),
                Operation::Read(_) => panic!("display must never be read"),
            }
        }
        self.log.borrow_mut().push(Event::Write(address, bytes));
        Ok(())
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl embedded_hal::i2c::I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.record(address, operations)
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.record(address, operations)
    }
}

pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
    }
}
