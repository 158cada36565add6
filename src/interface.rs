//! Bus interface implementations for the ST1VAFE6AX
//!
//! Both adapters implement `device_driver::RegisterInterface` with 8-bit
//! register addresses. Multi-byte transfers rely on the device's address
//! auto-increment (`CTRL3.IF_INC`, enabled by default).

use crate::{Error, I2C_ADDRESS_SA0_HIGH, I2C_ADDRESS_SA0_LOW};
use device_driver::RegisterInterface;
use embedded_hal::{i2c, spi};

/// I2C (and I3C in legacy I2C mode) interface for the ST1VAFE6AX
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x6A, SDO/SA0 pin LOW)
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut sensor = St1vafe6axDriver::new(interface)?;
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_SA0_LOW,
        }
    }

    /// Create a new I2C interface with the alternative address (0x6B, SDO/SA0 pin HIGH)
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_SA0_HIGH,
        }
    }

    /// Create a new I2C interface with a custom 7-bit device address
    ///
    /// For the two addresses selectable with the SA0 pin, prefer
    /// [`default()`](Self::default) or [`alternative()`](Self::alternative).
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        // Adjacent writes in one transaction go out without a repeated start,
        // so the register address and the payload form a single frame.
        let mut operations = [
            i2c::Operation::Write(&[address]),
            i2c::Operation::Write(write_data),
        ];
        self.i2c.transaction(self.address, &mut operations)
    }
}

/// SPI interface for the ST1VAFE6AX (4-wire, mode 0 or 3)
///
/// Chip select is handled by the `SpiDevice` implementation you provide, e.g.
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Read flag in the address byte
    const READ: u8 = 0x80;

    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: spi::SpiDevice<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut operations = [
            spi::Operation::Write(&[address | Self::READ]),
            spi::Operation::Read(read_data),
        ];
        self.spi.transaction(&mut operations).map_err(Error::Bus)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut operations = [
            spi::Operation::Write(&[address & !Self::READ]),
            spi::Operation::Write(write_data),
        ];
        self.spi.transaction(&mut operations).map_err(Error::Bus)
    }
}
