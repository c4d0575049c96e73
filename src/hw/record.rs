// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line framing for log records on the debug terminal.

use core::fmt::{self, Write};

use log::Record;

/// Write `record` as `[LEVEL] message\r\n`.
pub fn write_record<W: Write>(out: &mut W, record: &Record) -> fmt::Result {
    write!(out, "[{}] {}\r\n", record.level(), record.args())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn record_is_framed_with_level_and_crlf() {
        let mut line = String::new();
        write_record(
            &mut line,
            &Record::builder()
                .level(Level::Info)
                .args(format_args!("cell {}", 3))
                .build(),
        )
        .unwrap();
        assert_eq!(line, "[INFO] cell 3\r\n");
    }
}
