//! Scripted GPIO mock for driver tests
//!
//! Pins share a script of packed level samples. Each `wait_for_*` call
//! applies the next sample and returns; once the script is exhausted the
//! wait never completes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal_async::digital::Wait;

#[derive(Default)]
struct Script {
    samples: VecDeque<u8>,
    current: u8,
}

/// Handle used to build pins over one script
#[derive(Clone, Default)]
pub struct Bench {
    script: Rc<RefCell<Script>>,
}

impl Bench {
    /// Bench with all pins at the given packed levels
    pub fn new(initial: u8) -> Self {
        let bench = Self::default();
        bench.script.borrow_mut().current = initial;
        bench
    }

    /// Queue samples applied by subsequent waits
    pub fn push(&self, samples: &[u8]) {
        self.script.borrow_mut().samples.extend(samples.iter().copied());
    }

    /// Samples not yet applied
    pub fn remaining(&self) -> usize {
        self.script.borrow().samples.len()
    }

    /// Pin reading bit `bit` of each sample
    pub fn pin(&self, bit: u8) -> MockPin {
        MockPin {
            script: self.script.clone(),
            mask: 1 << bit,
        }
    }
}

pub struct MockPin {
    script: Rc<RefCell<Script>>,
    mask: u8,
}

impl MockPin {
    async fn next_sample(&mut self) -> Result<(), Infallible> {
        let next = self.script.borrow_mut().samples.pop_front();
        match next {
            Some(sample) => {
                self.script.borrow_mut().current = sample;
                Ok(())
            }
            None => core::future::pending().await,
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.script.borrow().current & self.mask != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl Wait for MockPin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        self.next_sample().await
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.next_sample().await
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.next_sample().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.next_sample().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.next_sample().await
    }
}
