use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use mixosc_client::DeviceInfo;
use mixosc_units::Param;
use mixosc_wire::tag::tag_name;
use mixosc_wire::{Argument, Message};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
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

#[derive(Serialize)]
struct MessageOutput<'a> {
    address: &'a str,
    type_tags: String,
    args: Vec<Value>,
    timestamp: String,
}

pub fn print_message(msg: &Message, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = MessageOutput {
                address: msg.address(),
                type_tags: msg.type_tags(),
                args: msg.args().iter().map(arg_json).collect(),
                timestamp: now_unix_seconds(),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ADDRESS", "#", "TYPE", "VALUE"]);
            if msg.args().is_empty() {
                table.add_row(vec![msg.address(), "-", "-", "-"]);
            }
            for (index, arg) in msg.args().iter().enumerate() {
                table.add_row(arg_row(msg.address(), index, arg));
            }
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{msg}"),
    }
}

#[derive(Serialize)]
struct InfoOutput<'a> {
    ip: &'a str,
    name: &'a str,
    model: &'a str,
    firmware: &'a str,
    kind: &'a str,
}

pub fn print_info(info: &DeviceInfo, kind: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&InfoOutput {
            ip: &info.ip,
            name: &info.name,
            model: &info.model,
            firmware: &info.firmware,
            kind,
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"])
                .add_row(vec!["ip", info.ip.as_str()])
                .add_row(vec!["name", info.name.as_str()])
                .add_row(vec!["model", info.model.as_str()])
                .add_row(vec!["firmware", info.firmware.as_str()])
                .add_row(vec!["kind", kind]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{} ({}) at {} firmware={} kind={kind}",
                info.name, info.model, info.ip, info.firmware
            );
        }
    }
}

pub fn print_value(address: &str, param: Param, value: f64, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&json!({
            "address": address,
            "param": param.name(),
            "value": value,
            "unit": param.unit(),
        })),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ADDRESS", "PARAM", "VALUE"])
                .add_row(vec![
                    address.to_string(),
                    param.name().to_string(),
                    format_value(value, param.unit()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{address} {}", format_value(value, param.unit()));
        }
    }
}

fn format_value(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value}")
    } else {
        format!("{value} {unit}")
    }
}

fn arg_json(arg: &Argument) -> Value {
    match arg {
        Argument::Int(v) => json!({ "type": "i", "value": v }),
        Argument::Float(v) => json!({ "type": "f", "value": v }),
        Argument::String(v) => json!({ "type": "s", "value": v }),
        Argument::Blob(v) => json!({ "type": "b", "value": hex(v) }),
    }
}

fn arg_row(address: &str, index: usize, arg: &Argument) -> Vec<String> {
    vec![
        address.to_string(),
        index.to_string(),
        tag_name(arg.tag()).to_string(),
        arg_text(arg),
    ]
}

fn arg_text(arg: &Argument) -> String {
    match arg {
        Argument::String(v) => v.clone(),
        Argument::Blob(v) => hex(v),
        other => other.to_string(),
    }
}

fn hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
