use crate::config::CSV_HEADER;
use crate::curve::{CurveData, CurvePoint};
use crate::error::{ExportError, Result};
use csv::{ReaderBuilder, StringRecord, Terminator, Writer, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Renders a value as the shortest decimal that parses back to the same `f64`.
///
/// Integral values carry no fractional part (`1500`, not `1500.0`), exponent
/// notation is never used and negative zero is written as `0`.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

// Create CSV writer with headers
pub fn create_csv_writer<W: Write>(inner: W) -> Result<Writer<W>> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(inner);

    // Write header
    wtr.write_record(CSV_HEADER)?;

    Ok(wtr)
}

// Writes one row per sample, efficiency scaled to percent
pub fn write_curve_rows<W: Write>(wtr: &mut Writer<W>, data: &CurveData) -> Result<()> {
    for point in data.points() {
        wtr.write_record(&[
            format_value(point.flow),
            format_value(point.head),
            format_value(100.0 * point.efficiency),
            format_value(point.speed),
        ])?;
    }
    Ok(())
}

/// Flushes the writer and hands back its sink.
pub fn finish_writer<W: Write>(wtr: Writer<W>) -> Result<W> {
    wtr.into_inner()
        .map_err(|e| ExportError::io("finish CSV document", e.into_error()))
}

impl CurvePoint {
    fn from_record(record: &StringRecord, row: usize) -> Result<Self> {
        if record.len() != CSV_HEADER.len() {
            return Err(ExportError::MalformedRow {
                row,
                reason: format!("expected {} fields, got {}", CSV_HEADER.len(), record.len()),
            });
        }

        let parse = |i: usize| -> Result<f64> {
            record[i]
                .trim()
                .parse::<f64>()
                .map_err(|e| ExportError::MalformedRow {
                    row,
                    reason: format!("'{}' in column {}: {}", &record[i], CSV_HEADER[i], e),
                })
        };

        Ok(CurvePoint {
            flow: parse(0)?,
            head: parse(1)?,
            efficiency: parse(2)? / 100.0,
            speed: parse(3)?,
        })
    }
}

/// Parses an exported curves document back into curve data.
pub fn read_curves<R: Read>(reader: R) -> Result<CurveData> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?;
    if headers.iter().ne(CSV_HEADER) {
        return Err(ExportError::UnexpectedHeader {
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let (mut flow, mut head, mut efficiency, mut speed) =
        (Vec::new(), Vec::new(), Vec::new(), Vec::new());
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // rows are numbered from 1, header excluded
        let point = CurvePoint::from_record(&record, i + 1)?;
        flow.push(point.flow);
        head.push(point.head);
        efficiency.push(point.efficiency);
        speed.push(point.speed);
    }

    tracing::debug!(rows = flow.len(), "read curves document");
    CurveData::new(flow, head, efficiency, speed)
}

pub fn read_curves_file(path: &Path) -> Result<CurveData> {
    let file = File::open(path)
        .map_err(|e| ExportError::io(format!("open {}", path.display()), e))?;
    read_curves(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_have_no_fraction() {
        assert_eq!(format_value(1500.0), "1500");
        assert_eq!(format_value(1.5), "1.5");
        assert_eq!(format_value(9.81), "9.81");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(1e-7), "0.0000001");
    }

    #[test]
    fn percent_scaling_is_not_rounded() {
        assert_eq!(format_value(100.0 * 0.85), "85");
        assert_eq!(format_value(100.0 * 0.123), "12.3");
        assert_eq!(format_value(100.0 * 0.07), "7.000000000000001");
    }

    #[derive(Debug)]
    struct SinkGone;

    impl std::fmt::Display for SinkGone {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("sink gone")
        }
    }

    impl std::error::Error for SinkGone {}

    // Accepts nothing
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, SinkGone))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn finish_keeps_the_sink_error() {
        let wtr = create_csv_writer(BrokenSink).unwrap();
        let Err(ExportError::Io { operation, source }) = finish_writer(wtr) else {
            panic!("expected an IO error");
        };
        assert_eq!(operation, "finish CSV document");
        assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe);
        assert!(
            source
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<SinkGone>())
                .is_some()
        );
    }

    #[test]
    fn reads_exported_rows() {
        let text = "flow(m**3/s),head(J/kg),efficiency(%),speed(RPM)\n1,10,50,100\n2,20,60,200\n";
        let data = read_curves(text.as_bytes()).unwrap();
        assert_eq!(data.flow(), &[1.0, 2.0]);
        assert_eq!(data.head(), &[10.0, 20.0]);
        assert_eq!(data.efficiency(), &[0.5, 0.6]);
        assert_eq!(data.speed(), &[100.0, 200.0]);
    }

    #[test]
    fn header_only_reads_as_empty() {
        let text = "flow(m**3/s),head(J/kg),efficiency(%),speed(RPM)\n";
        assert!(read_curves(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn foreign_header_is_rejected() {
        let text = "step,feature_id,flow,velocity\n1,2,3,4\n";
        match read_curves(text.as_bytes()) {
            Err(ExportError::UnexpectedHeader { found }) => {
                assert_eq!(found, "step,feature_id,flow,velocity")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn short_row_reports_its_number() {
        let text = "flow(m**3/s),head(J/kg),efficiency(%),speed(RPM)\n1,10,50,100\n2,20,60\n";
        assert!(matches!(
            read_curves(text.as_bytes()),
            Err(ExportError::MalformedRow { row: 2, .. })
        ));
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let text = "flow(m**3/s),head(J/kg),efficiency(%),speed(RPM)\n1,ten,50,100\n";
        assert!(matches!(
            read_curves(text.as_bytes()),
            Err(ExportError::MalformedRow { row: 1, .. })
        ));
    }
}
