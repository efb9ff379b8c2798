use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use ffbmidi_frame::{Sequence, Step};
use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "step", rename_all = "snake_case")]
enum StepOutput {
    Send {
        kind: &'static str,
        len: usize,
        hex: String,
    },
    Delay {
        ms: u32,
    },
}

#[derive(Serialize, Debug)]
struct SequenceOutput<'a> {
    command: &'a str,
    message_count: usize,
    total_bytes: usize,
    steps: Vec<StepOutput>,
}

fn step_outputs(sequence: &Sequence) -> Vec<StepOutput> {
    sequence
        .steps()
        .iter()
        .map(|step| match step {
            Step::Send(frame) => StepOutput::Send {
                kind: frame.kind().name(),
                len: frame.len(),
                hex: frame.to_hex(),
            },
            Step::Delay(ms) => StepOutput::Delay { ms: *ms },
        })
        .collect()
}

/// Print what a command would put on the wire.
pub fn print_sequence(command: &str, sequence: &Sequence, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = SequenceOutput {
                command,
                message_count: sequence.message_count(),
                total_bytes: sequence.wire_bytes().len(),
                steps: step_outputs(sequence),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "KIND", "LEN", "BYTES"]);
            for (index, step) in step_outputs(sequence).into_iter().enumerate() {
                let row = match step {
                    StepOutput::Send { kind, len, hex } => {
                        vec![index.to_string(), kind.to_string(), len.to_string(), hex]
                    }
                    StepOutput::Delay { ms } => vec![
                        index.to_string(),
                        "delay".to_string(),
                        String::new(),
                        format!("{ms} ms"),
                    ],
                };
                table.add_row(row);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for step in sequence.steps() {
                match step {
                    Step::Send(frame) => println!("{frame}"),
                    Step::Delay(ms) => println!("# wait {ms} ms"),
                }
            }
        }
        OutputFormat::Raw => print_raw(&sequence.wire_bytes()),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
