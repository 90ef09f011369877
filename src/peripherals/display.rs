//! Display control module for PineTime

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use mipidsi::{models::ST7789, Builder, Orientation};

use pinetime_dial::system::config::{LCD_H, LCD_W};

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

/// ST7789 panel driven over SPI
pub struct Display<SPI>
where
    SPI: spim::Instance,
{
    lcd: Lcd<'static, SPI>,
}

impl<SPI> Display<SPI>
where
    SPI: spim::Instance,
{
    /// Reset and configure the panel on boot
    pub fn init(
        spim: Spim<'static, SPI>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W as u16, LCD_H as u16)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;

        Ok(Self { lcd })
    }

    /// Fill the whole panel with `color`
    pub fn clear(&mut self, color: Rgb565) -> Result<(), Error> {
        self.lcd.clear(color).map_err(|_| Error::Write)
    }
}

impl<SPI> OriginDimensions for Display<SPI>
where
    SPI: spim::Instance,
{
    fn size(&self) -> Size {
        self.lcd.size()
    }
}

impl<SPI> DrawTarget for Display<SPI>
where
    SPI: spim::Instance,
{
    type Color = Rgb565;
    type Error = Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.lcd.draw_iter(pixels).map_err(|_| Error::Write)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.lcd.fill_solid(area, color).map_err(|_| Error::Write)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// The panel did not come out of reset
    Init,
    /// A transfer to the panel failed
    Write,
}
