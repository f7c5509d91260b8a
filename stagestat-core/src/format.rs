//! Status and alarm message text
//!
//! Messages are written into caller-owned `heapless::String<N>` buffers so
//! nothing points into controller storage. A message that does not fit is an
//! error and the buffer is left empty; truncated text is never handed out.
//!
//! ```text
//! value=20.00 ; setpoint=40.00 ; output=100%
//! Alarm: Low ; value=30.00 ; alarm=40.00 ; setpoint=50.00 ; output=100%
//! ```

use core::fmt::Write;

use heapless::String;

use crate::{
    alarm::AlarmKind,
    errors::{ControlError, ControlResult},
};

/// Write the periodic status line
pub fn write_status<const N: usize>(
    out: &mut String<N>,
    value: f32,
    setpoint: f32,
    percent: u8,
) -> ControlResult<()> {
    out.clear();
    let written = write!(
        out,
        "value={:.2} ; setpoint={:.2} ; output={:03}%",
        value, setpoint, percent
    );
    finish(out, written)
}

/// Write an alarm notification
pub fn write_alarm<const N: usize>(
    out: &mut String<N>,
    kind: AlarmKind,
    value: f32,
    threshold: f32,
    setpoint: f32,
    percent: u8,
) -> ControlResult<()> {
    out.clear();
    let written = write!(
        out,
        "Alarm: {} ; value={:.2} ; alarm={:.2} ; setpoint={:.2} ; output={:03}%",
        kind, value, threshold, setpoint, percent
    );
    finish(out, written)
}

fn finish<const N: usize>(out: &mut String<N>, written: core::fmt::Result) -> ControlResult<()> {
    if written.is_err() {
        out.clear();
        return Err(ControlError::BufferTooSmall { capacity: N });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line() {
        let mut out: String<64> = String::new();
        write_status(&mut out, 20.0, 40.0, 100).unwrap();
        assert_eq!(out.as_str(), "value=20.00 ; setpoint=40.00 ; output=100%");
    }

    #[test]
    fn percent_is_zero_padded() {
        let mut out: String<64> = String::new();
        write_status(&mut out, -3.5, 21.25, 7).unwrap();
        assert_eq!(out.as_str(), "value=-3.50 ; setpoint=21.25 ; output=007%");
    }

    #[test]
    fn alarm_line() {
        let mut out: String<100> = String::new();
        write_alarm(&mut out, AlarmKind::High, 61.0, 55.0, 50.0, 33).unwrap();
        assert_eq!(
            out.as_str(),
            "Alarm: High ; value=61.00 ; alarm=55.00 ; setpoint=50.00 ; output=033%"
        );
    }

    #[test]
    fn too_small_buffer_is_cleared() {
        let mut out: String<16> = String::new();
        let result = write_status(&mut out, 20.0, 40.0, 100);

        assert_eq!(result, Err(ControlError::BufferTooSmall { capacity: 16 }));
        assert!(out.is_empty());
    }

    #[test]
    fn exact_fit() {
        // "value=20.00 ; setpoint=40.00 ; output=100%" is 42 bytes
        let mut out: String<42> = String::new();
        assert!(write_status(&mut out, 20.0, 40.0, 100).is_ok());

        let mut out: String<41> = String::new();
        assert!(write_status(&mut out, 20.0, 40.0, 100).is_err());
    }
}
