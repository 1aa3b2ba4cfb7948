// src/output.rs
//! CSV reporting helpers for the demo and benchmark binaries.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One row per candidate stock level: `q,value`
pub fn write_sweep_to_csv<P: AsRef<Path>>(path: P, rows: &[(f64, f64)]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "q,value")?;
    for (q, value) in rows {
        writeln!(file, "{},{}", q, value)?;
    }
    file.flush()
}

pub fn write_summary_to_csv<P: AsRef<Path>>(path: P, summary_data: &[(&str, String)]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sweep_csv_layout() {
        let path = std::env::temp_dir().join(format!("stock_math_sweep_{}.csv", std::process::id()));
        write_sweep_to_csv(&path, &[(100.0, 12.5), (110.0, 13.25)]).expect("writable temp dir");
        let content = fs::read_to_string(&path).expect("file written");
        fs::remove_file(&path).ok();
        assert_eq!(content, "q,value\n100,12.5\n110,13.25\n");
    }

    #[test]
    fn test_summary_csv_layout() {
        let path = std::env::temp_dir().join(format!("stock_math_summary_{}.csv", std::process::id()));
        write_summary_to_csv(&path, &[("q_star", "417.23".to_string()), ("trials", "1000".to_string())])
            .expect("writable temp dir");
        let content = fs::read_to_string(&path).expect("file written");
        fs::remove_file(&path).ok();
        assert_eq!(content, "q_star,417.23\ntrials,1000\n");
    }
}
