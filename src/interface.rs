//! The hardware transport seam between the driver and the bus wiring of a particular module.
//!
//! Every transfer is blocking. The driver never retries; any bus error surfaces to the caller of
//! `Display::init` or `Display::flush` wrapped in [`Error::Interface`](crate::error::Error).

use core::fmt::Debug;

/// Capability to move command and data bytes to an SSD1306 and to pulse its reset line.
///
/// Only `send_commands`, `send_data_bulk` and `reset` must be implemented; the single-byte
/// variants and `init` have defaults built on them.
pub trait DisplayInterface {
    /// Error type of the underlying bus or pins.
    type Error: Debug;

    /// Bring the bus and control lines into their idle state.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Transfer one byte in command mode.
    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        self.send_commands(&[cmd])
    }

    /// Transfer `cmds` in command mode as one burst.
    fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error>;

    /// Transfer one byte in data mode.
    fn send_data(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.send_data_bulk(&[byte])
    }

    /// Transfer `buf` in data mode as one burst.
    fn send_data_bulk(&mut self, buf: &[u8]) -> Result<(), Self::Error>;

    /// Pulse the panel's hardware reset line.
    fn reset(&mut self) -> Result<(), Self::Error>;
}

/// Errors raised by the provided bus interfaces.
#[derive(Debug, PartialEq, Eq)]
pub enum InterfaceError<BusErr, PinErr> {
    /// The SPI or I2C transfer failed.
    Bus(BusErr),
    /// Driving the D/C or RST line failed.
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Bus(e) => write!(f, "bus error: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

pub mod spi {
    //! The SPI interface supports the "4-wire" interface of the driver, such that each word on the
    //! SPI bus is 8 bits and a separate D/C GPIO selects between command and data. Chip select is
    //! owned by the `SpiDevice`.

    use core::fmt::Debug;

    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::OutputPin;
    use embedded_hal::spi::SpiDevice;

    use super::{DisplayInterface, InterfaceError};

    /// How long RST is held low, and how long the chip is given to come out of reset.
    pub const RESET_PULSE_MS: u32 = 10;
    /// Settling time after switching the D/C line.
    pub const DC_SETUP_US: u32 = 1;

    pub struct SpiInterface<SPI, DC, RST, DELAY> {
        /// The SPI device connected to the SSD1306.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the SSD1306 (the fourth
        /// "wire" of "4-wire" mode).
        dc: DC,
        /// A GPIO output pin connected to the active-low RES# pin.
        rst: RST,
        delay: DELAY,
    }

    impl<SPI, DC, RST, DELAY> SpiInterface<SPI, DC, RST, DELAY>
    where
        SPI: SpiDevice,
        DC: OutputPin,
        RST: OutputPin,
        DELAY: DelayNs,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// device, `dc` the GPIO output pin connected to the D/C pin, `rst` the pin connected to
        /// RES#, and `delay` times the reset pulse.
        pub fn new(spi: SPI, dc: DC, rst: RST, delay: DELAY) -> Self {
            Self {
                spi,
                dc,
                rst,
                delay,
            }
        }

        /// Give back the bus, pins and delay.
        pub fn release(self) -> (SPI, DC, RST, DELAY) {
            (self.spi, self.dc, self.rst, self.delay)
        }
    }

    impl<SPI, DC, RST, DELAY, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST, DELAY>
    where
        SPI: SpiDevice,
        DC: OutputPin<Error = PinErr>,
        RST: OutputPin<Error = PinErr>,
        DELAY: DelayNs,
        PinErr: Debug,
    {
        type Error = InterfaceError<SPI::Error, PinErr>;

        fn init(&mut self) -> Result<(), Self::Error> {
            self.rst.set_high().map_err(InterfaceError::Pin)?;
            self.dc.set_low().map_err(InterfaceError::Pin)
        }

        fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error> {
            self.dc.set_low().map_err(InterfaceError::Pin)?;
            self.delay.delay_us(DC_SETUP_US);
            self.spi.write(cmds).map_err(InterfaceError::Bus)
        }

        fn send_data_bulk(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
            self.delay.delay_us(DC_SETUP_US);
            self.spi.write(buf).map_err(InterfaceError::Bus)
        }

        fn reset(&mut self) -> Result<(), Self::Error> {
            self.rst.set_low().map_err(InterfaceError::Pin)?;
            self.delay.delay_ms(RESET_PULSE_MS);
            self.rst.set_high().map_err(InterfaceError::Pin)?;
            self.delay.delay_ms(RESET_PULSE_MS);
            Ok(())
        }
    }
}

pub mod i2c {
    //! The I2C interface frames every write with a control byte: `0x00` announces a stream of
    //! commands, `0x40` a stream of display RAM data. Most I2C modules tie RES# to the supply, so
    //! `reset` does nothing here.

    use core::convert::Infallible;

    use embedded_hal::i2c::I2c;

    use super::{DisplayInterface, InterfaceError};

    /// The usual 7-bit address with SA0 pulled low.
    pub const DEFAULT_ADDRESS: u8 = 0x3C;

    const CONTROL_CMD_STREAM: u8 = 0x00;
    const CONTROL_DATA_STREAM: u8 = 0x40;
    const CHUNK_LEN: usize = 32;

    pub struct I2cInterface<I2C> {
        i2c: I2C,
        address: u8,
    }

    impl<I2C: I2c> I2cInterface<I2C> {
        pub fn new(i2c: I2C, address: u8) -> Self {
            Self { i2c, address }
        }

        pub fn release(self) -> I2C {
            self.i2c
        }

        fn write_stream(&mut self, control: u8, bytes: &[u8]) -> Result<(), I2C::Error> {
            let mut frame = [0u8; CHUNK_LEN + 1];
            frame[0] = control;
            for chunk in bytes.chunks(CHUNK_LEN) {
                frame[1..=chunk.len()].copy_from_slice(chunk);
                self.i2c.write(self.address, &frame[..=chunk.len()])?;
            }
            Ok(())
        }
    }

    impl<I2C: I2c> DisplayInterface for I2cInterface<I2C> {
        type Error = InterfaceError<I2C::Error, Infallible>;

        fn send_commands(&mut self, cmds: &[u8]) -> Result<(), Self::Error> {
            self.write_stream(CONTROL_CMD_STREAM, cmds)
                .map_err(InterfaceError::Bus)
        }

        fn send_data_bulk(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.write_stream(CONTROL_DATA_STREAM, buf)
                .map_err(InterfaceError::Bus)
        }

        fn reset(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }
}


#[cfg(test)]
mod tests {
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;

    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
    use embedded_hal::i2c::{ErrorType as I2cErrorType, I2c, Operation as I2cOperation, SevenBitAddress};
    use embedded_hal::spi::{ErrorType as SpiErrorType, Operation, SpiDevice};

    use super::i2c::{I2cInterface, DEFAULT_ADDRESS};
    use super::spi::SpiInterface;
    use super::DisplayInterface;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Event {
        Dc(bool),
        Rst(bool),
        DelayUs(u32),
        DelayMs(u32),
        Write(Vec<u8>),
        I2cWrite(u8, Vec<u8>),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct FakeSpi(Log);
    struct FakePin(Log, fn(bool) -> Event);
    struct FakeDelay(Log);
    struct FakeI2c(Log);

    impl SpiErrorType for FakeSpi {
        type Error = Infallible;
    }

    impl SpiDevice for FakeSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    self.0.borrow_mut().push(Event::Write(bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    impl PinErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push((self.1)(false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push((self.1)(true));
            Ok(())
        }
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, _ns: u32) {}
        fn delay_us(&mut self, us: u32) {
            self.0.borrow_mut().push(Event::DelayUs(us));
        }
        fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(Event::DelayMs(ms));
        }
    }

    impl I2cErrorType for FakeI2c {
        type Error = Infallible;
    }

    impl I2c<SevenBitAddress> for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [I2cOperation<'_>],
        ) -> Result<(), Infallible> {
            for op in operations.iter() {
                if let I2cOperation::Write(bytes) = op {
                    self.0.borrow_mut().push(Event::I2cWrite(address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    fn spi_interface(log: &Log) -> SpiInterface<FakeSpi, FakePin, FakePin, FakeDelay> {
        SpiInterface::new(
            FakeSpi(log.clone()),
            FakePin(log.clone(), Event::Dc),
            FakePin(log.clone(), Event::Rst),
            FakeDelay(log.clone()),
        )
    }

    #[test]
    fn spi_command_and_data_select_dc() {
        let log = Log::default();
        let mut iface = spi_interface(&log);
        iface.send_commands(&[0xAE, 0xD5, 0x80]).unwrap();
        iface.send_data(0x5A).unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Dc(false),
                Event::DelayUs(1),
                Event::Write(vec![0xAE, 0xD5, 0x80]),
                Event::Dc(true),
                Event::DelayUs(1),
                Event::Write(vec![0x5A]),
            ]
        );
    }

    #[test]
    fn spi_init_and_reset_pulse() {
        let log = Log::default();
        let mut iface = spi_interface(&log);
        iface.init().unwrap();
        iface.reset().unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Rst(true),
                Event::Dc(false),
                Event::Rst(false),
                Event::DelayMs(10),
                Event::Rst(true),
                Event::DelayMs(10),
            ]
        );
    }

    #[test]
    fn i2c_frames_with_control_byte() {
        let log = Log::default();
        let mut iface = I2cInterface::new(FakeI2c(log.clone()), DEFAULT_ADDRESS);
        iface.send_command(0xAF).unwrap();
        iface.send_data_bulk(&[1, 2, 3]).unwrap();
        iface.reset().unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::I2cWrite(0x3C, vec![0x00, 0xAF]),
                Event::I2cWrite(0x3C, vec![0x40, 1, 2, 3]),
            ]
        );
    }

    #[test]
    fn i2c_chunks_long_transfers() {
        let log = Log::default();
        let mut iface = I2cInterface::new(FakeI2c(log.clone()), DEFAULT_ADDRESS);
        let data = (0..70u8).collect::<Vec<_>>();
        iface.send_data_bulk(&data).unwrap();
        let writes = log.borrow();
        assert_eq!(writes.len(), 3);
        let mut expected_first = vec![0x40];
        expected_first.extend(0..32u8);
        assert_eq!(writes[0], Event::I2cWrite(0x3C, expected_first));
        let mut expected_last = vec![0x40];
        expected_last.extend(64..70u8);
        assert_eq!(writes[2], Event::I2cWrite(0x3C, expected_last));
    }
}
