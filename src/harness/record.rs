use std::io::Write;
use std::time::Duration;

use crate::error::Result;

use super::strategy::Strategy;

/// One timed run of a strategy at problem size `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub strategy: Strategy,
    pub n: usize,
    pub elapsed: Duration,
}

impl RunRecord {
    /// `<label>, <N>, <seconds to 6 places>`
    pub fn to_line(&self) -> String {
        format!(
            "{}, {}, {:.6}",
            self.strategy.label(),
            self.n,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Where finished runs go.
pub trait RecordSink {
    fn emit(&mut self, record: &RunRecord) -> Result<()>;
}

impl RecordSink for Vec<RunRecord> {
    fn emit(&mut self, record: &RunRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// CSV results file: a header line, then one line per record.
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    pub const HEADER: &'static str = "Strategy, Input size, Time taken";

    /// Wrap `writer` and write the header.
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", Self::HEADER)?;
        Ok(Self { writer })
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn emit(&mut self, record: &RunRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.to_line())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let r = RunRecord {
            strategy: Strategy::SharedTiled,
            n: 1024,
            elapsed: Duration::from_micros(1_234_567),
        };
        assert_eq!(r.to_line(), "OpenMP Tiled, 1024, 1.234567");
    }

    #[test]
    fn test_csv_sink() {
        let mut sink = CsvSink::new(Vec::new()).unwrap();
        for n in [64, 128] {
            sink.emit(&RunRecord {
                strategy: Strategy::Sequential,
                n,
                elapsed: Duration::from_millis(5),
            })
            .unwrap();
        }
        let text = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(
            text,
            "Strategy, Input size, Time taken\n\
             Sequential, 64, 0.005000\n\
             Sequential, 128, 0.005000\n"
        );
    }
}
