//! HD44780 16x2 character LCD behind a PCF8574 I2C backpack
//!
//! The backpack maps its 8 output bits onto the LCD control lines:
//! - P0: RS (register select, 1 = data)
//! - P1: RW (kept low, write only)
//! - P2: EN (latches on the falling edge)
//! - P3: backlight
//! - P4..P7: D4..D7
//!
//! The controller runs in 4-bit mode, so every byte goes out as two nibbles, high first, and
//! every nibble as two bus bytes: one with EN raised, one with EN dropped.

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use crate::system::collaborator::{TextDisplay, TextLine};
use crate::system::config::LCD_COLUMNS;

/// Backpack address with A0..A2 pulled high
pub const LCD_ADDR: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06; // increment, no shift
const CMD_DISPLAY_ON: u8 = 0x0C; // display on, cursor off, blink off
const CMD_FUNCTION_SET: u8 = 0x28; // 4-bit, 2 lines, 5x8 font
const CMD_SET_DDRAM: u8 = 0x80;

const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

pub struct Lcd1602<I> {
    i2c: I,
    ready: bool,
}

impl<I: I2c> Lcd1602<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c, ready: false }
    }

    /// 4-bit initialization by instruction
    pub async fn init(&mut self) -> Result<(), I::Error> {
        Timer::after(Duration::from_millis(50)).await;

        for wait in [4_500, 150, 150] {
            self.write_nibble(0x30, 0).await?;
            Timer::after(Duration::from_micros(wait)).await;
        }
        self.write_nibble(0x20, 0).await?;

        self.command(CMD_FUNCTION_SET).await?;
        self.command(CMD_DISPLAY_ON).await?;
        self.command(CMD_CLEAR).await?;
        Timer::after(Duration::from_millis(2)).await;
        self.command(CMD_ENTRY_MODE).await?;

        self.ready = true;
        Ok(())
    }

    /// Writes `text` at the start of `row`, padded or cut to the panel width
    pub async fn write_row(&mut self, row: usize, text: &str) -> Result<(), I::Error> {
        let offset = ROW_OFFSETS[row.min(ROW_OFFSETS.len() - 1)];
        self.command(CMD_SET_DDRAM | offset).await?;

        let mut chars = text.chars();
        for _ in 0..LCD_COLUMNS {
            let byte = match chars.next() {
                Some(c) if c.is_ascii() => c as u8,
                Some(_) => b'?',
                None => b' ',
            };
            self.data(byte).await?;
        }
        Ok(())
    }

    async fn command(&mut self, value: u8) -> Result<(), I::Error> {
        self.write_byte(value, 0).await
    }

    async fn data(&mut self, value: u8) -> Result<(), I::Error> {
        self.write_byte(value, RS).await
    }

    async fn write_byte(&mut self, value: u8, mode: u8) -> Result<(), I::Error> {
        self.write_nibble(value & 0xF0, mode).await?;
        self.write_nibble(value << 4, mode).await
    }

    /// `nibble` in the upper four bits
    async fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), I::Error> {
        let bits = nibble | mode | BACKLIGHT;
        self.i2c.write(LCD_ADDR, &[bits | EN, bits]).await
    }
}

impl<I: I2c> TextDisplay for Lcd1602<I> {
    type Error = I::Error;

    async fn write_lines(&mut self, lines: &[TextLine; 2]) -> Result<(), Self::Error> {
        if !self.ready {
            self.init().await?;
        }
        for (row, line) in lines.iter().enumerate() {
            self.write_row(row, line).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};

    #[derive(Default)]
    struct FakeBus {
        bytes: std::vec::Vec<u8>,
        fail: bool,
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            assert_eq!(address, LCD_ADDR);
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.bytes.extend_from_slice(bytes);
                }
            }
            Ok(())
        }
    }

    /// What the controller latched: (rs, nibble) per EN pulse
    fn nibbles(bytes: &[u8]) -> std::vec::Vec<(bool, u8)> {
        bytes
            .chunks(2)
            .map(|pair| {
                assert_eq!(pair[0] & EN, EN);
                assert_eq!(pair[1] & EN, 0);
                assert_eq!(pair[0] & BACKLIGHT, BACKLIGHT);
                assert_eq!(pair[0] & !EN, pair[1]);
                (pair[1] & RS != 0, pair[1] >> 4)
            })
            .collect()
    }

    /// Pairs nibbles into (rs, byte), skipping the four single-nibble init steps
    fn transfers(bytes: &[u8]) -> std::vec::Vec<(bool, u8)> {
        let nibbles = nibbles(bytes);
        let init: std::vec::Vec<u8> = nibbles[..4].iter().map(|n| n.1).collect();
        assert_eq!(init, [0x3, 0x3, 0x3, 0x2]);
        nibbles[4..]
            .chunks(2)
            .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair[1].1))
            .collect()
    }

    fn line(s: &str) -> TextLine {
        TextLine::try_from(s).unwrap()
    }

    #[test]
    fn first_write_initializes_then_draws_both_rows() {
        let mut lcd = Lcd1602::new(FakeBus::default());
        let lines = [line("OK 23.5C 45%"), line("Status: NORMAL")];
        block_on(lcd.write_lines(&lines)).unwrap();

        let sent = transfers(&lcd.i2c.bytes);
        let commands: std::vec::Vec<u8> = sent.iter().take(4).map(|t| t.1).collect();
        assert_eq!(&commands[..2], [CMD_FUNCTION_SET, CMD_DISPLAY_ON]);
        assert_eq!(&commands[2..], [CMD_CLEAR, CMD_ENTRY_MODE]);

        let rows = &sent[4..];
        assert_eq!(rows.len(), 2 * (1 + LCD_COLUMNS));
        assert_eq!(rows[0], (false, 0x80));
        assert_eq!(rows[1 + LCD_COLUMNS], (false, 0xC0));

        let text = |row: &[(bool, u8)]| -> std::string::String {
            assert!(row.iter().all(|t| t.0));
            row.iter().map(|t| t.1 as char).collect()
        };
        assert_eq!(text(&rows[1..=LCD_COLUMNS]), "OK 23.5C 45%    ");
        assert_eq!(text(&rows[2 + LCD_COLUMNS..]), "Status: NORMAL  ");
    }

    #[test]
    fn later_writes_skip_init() {
        let mut lcd = Lcd1602::new(FakeBus::default());
        let blank = [TextLine::new(), TextLine::new()];
        block_on(lcd.write_lines(&blank)).unwrap();
        let first = lcd.i2c.bytes.len();

        block_on(lcd.write_lines(&blank)).unwrap();
        // two rows of address + 16 characters, 4 bus bytes each
        assert_eq!(lcd.i2c.bytes.len() - first, 2 * (1 + LCD_COLUMNS) * 4);
    }

    #[test]
    fn non_ascii_is_replaced() {
        let mut lcd = Lcd1602::new(FakeBus::default());
        lcd.ready = true;
        block_on(lcd.write_row(0, "25°C")).unwrap();

        let nibbles = nibbles(&lcd.i2c.bytes);
        let bytes: std::vec::Vec<u8> = nibbles[2..10]
            .chunks(2)
            .map(|pair| (pair[0].1 << 4) | pair[1].1)
            .collect();
        assert_eq!(bytes, b"25?C");
    }

    #[test]
    fn bus_error_is_returned_and_init_retried() {
        let mut lcd = Lcd1602::new(FakeBus {
            fail: true,
            ..Default::default()
        });
        let blank = [TextLine::new(), TextLine::new()];
        assert_eq!(block_on(lcd.write_lines(&blank)), Err(ErrorKind::Other));
        assert!(!lcd.ready);

        lcd.i2c.fail = false;
        block_on(lcd.write_lines(&blank)).unwrap();
        assert!(lcd.ready);
    }
}
