#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::{delay::DelayNs, digital, spi};
use st77xx_spi::{interface::SpiInterface, models::Model, Builder, Display};

/// Control lines driven by the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Dc,
    Cs,
    Reset,
    Backlight,
}

/// Everything the display does to its collaborators, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write(Vec<u8>),
    Pin(Line, bool),
    DelayMs(u32),
    DelayNs(u32),
}

/// One chip select frame, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Command(u8, Vec<u8>),
    Pixels(Vec<Vec<u8>>),
}

#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Splits the log into chip select frames and drops frames without bus traffic.
    pub fn frames(&self) -> Vec<Frame> {
        decode(&self.take())
    }

    pub fn delays(&self) -> Vec<u32> {
        self.take()
            .into_iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }
}

pub fn decode(events: &[Event]) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut dc_high = false;
    let mut current: Option<Vec<(bool, Vec<u8>)>> = None;

    for event in events {
        match event {
            Event::Pin(Line::Dc, level) => dc_high = *level,
            Event::Pin(Line::Cs, false) => current = Some(Vec::new()),
            Event::Pin(Line::Cs, true) => {
                let writes = current.take().expect("chip select released twice");
                if let Some(frame) = frame_from(writes) {
                    frames.push(frame);
                }
            }
            Event::Write(bytes) => current
                .as_mut()
                .expect("bus write outside of a chip select frame")
                .push((dc_high, bytes.clone())),
            _ => {}
        }
    }
    assert!(current.is_none(), "chip select left active");
    frames
}

fn frame_from(writes: Vec<(bool, Vec<u8>)>) -> Option<Frame> {
    let mut writes = writes.into_iter();
    let (data, first) = writes.next()?;
    if data {
        let mut chunks = vec![first];
        chunks.extend(writes.map(|(_, bytes)| bytes));
        Some(Frame::Pixels(chunks))
    } else {
        assert_eq!(first.len(), 1, "command phase must be a single byte");
        let args = writes.flat_map(|(_, bytes)| bytes).collect();
        Some(Frame::Command(first[0], args))
    }
}

pub struct RecordingSpi(pub Log);

impl spi::ErrorType for RecordingSpi {
    type Error = spi::ErrorKind;
}

impl spi::SpiBus for RecordingSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        unimplemented!("the display never reads")
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.0.push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        unimplemented!("the display never reads")
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        unimplemented!("the display never reads")
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Bus that accepts `remaining` writes and fails every write after that.
pub struct FailingSpi {
    pub remaining: usize,
}

impl spi::ErrorType for FailingSpi {
    type Error = spi::ErrorKind;
}

impl spi::SpiBus for FailingSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        if self.remaining == 0 {
            return Err(spi::ErrorKind::Overrun);
        }
        self.remaining -= 1;
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Recording bus that fails the next `failures` writes before recovering.
pub struct FlakySpi {
    pub log: Log,
    pub failures: Rc<Cell<usize>>,
}

impl spi::ErrorType for FlakySpi {
    type Error = spi::ErrorKind;
}

impl spi::SpiBus for FlakySpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        unimplemented!("the display never reads")
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let failures = self.failures.get();
        if failures > 0 {
            self.failures.set(failures - 1);
            return Err(spi::ErrorKind::Overrun);
        }
        self.log.push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        unimplemented!("the display never reads")
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        unimplemented!("the display never reads")
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct RecordingPin(pub Line, pub Log);

impl digital::ErrorType for RecordingPin {
    type Error = core::convert::Infallible;
}

impl digital::OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.1.push(Event::Pin(self.0, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.1.push(Event::Pin(self.0, true));
        Ok(())
    }
}

pub struct RecordingDelay(pub Log);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
    }
}

pub type TestInterface = SpiInterface<RecordingSpi, RecordingPin, RecordingPin>;
pub type TestDisplay<M> = Display<TestInterface, M, RecordingPin, RecordingPin>;

pub fn interface(log: &Log) -> TestInterface {
    SpiInterface::new(RecordingSpi(log.clone()), RecordingPin(Line::Dc, log.clone()))
        .with_cs(RecordingPin(Line::Cs, log.clone()))
}

/// Builds a display with every line connected. Nothing is sent yet.
pub fn display<M: Model>(model: M, width: u16, height: u16) -> (TestDisplay<M>, Log) {
    let log = Log::default();
    let display = Builder::new(model, interface(&log))
        .reset_pin(RecordingPin(Line::Reset, log.clone()))
        .backlight_pin(RecordingPin(Line::Backlight, log.clone()))
        .display_size(width, height)
        .build()
        .unwrap();
    (display, log)
}

pub fn window(x0: u16, y0: u16, x1: u16, y1: u16) -> [Frame; 3] {
    let range = |a: u16, b: u16| {
        let mut bytes = a.to_be_bytes().to_vec();
        bytes.extend(b.to_be_bytes());
        bytes
    };
    [
        Frame::Command(0x2A, range(x0, x1)),
        Frame::Command(0x2B, range(y0, y1)),
        Frame::Command(0x2C, vec![]),
    ]
}

pub fn solid(color: u16, pixels: usize) -> Vec<u8> {
    color.to_be_bytes().repeat(pixels)
}
