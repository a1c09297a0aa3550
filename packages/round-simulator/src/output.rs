//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::simulator::GameResult;
use crate::types::OutputFormat;

pub struct OutputWriter {
    writer: Box<dyn Write>,
    format: OutputFormat,
    path: Option<PathBuf>,
    /// Buffered games for the single-document JSON format.
    pending: Vec<GameResult>,
}

impl OutputWriter {
    /// Write to `path`, or to stdout when none is given.
    pub fn new(path: Option<&Path>, format: OutputFormat) -> io::Result<Self> {
        let writer: Box<dyn Write> = match path {
            Some(p) => {
                if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir)?;
                }
                let file: File = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(p)?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };
        Ok(Self {
            writer,
            format,
            path: path.map(Path::to_path_buf),
            pending: Vec::new(),
        })
    }

    pub fn write_game(&mut self, game: GameResult) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(&game)?;
                writeln!(self.writer, "{json}")?;
                self.writer.flush()?;
            }
            OutputFormat::Json => self.pending.push(game),
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        if matches!(self.format, OutputFormat::Json) {
            serde_json::to_writer_pretty(&mut self.writer, &self.pending)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn output_path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}
