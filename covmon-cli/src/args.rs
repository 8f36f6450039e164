//! Command-line surface.
//!
//! Options are historically written with a single dash and in any case
//! (`-action Run`, `-VALUE2CRYPT x`); they are normalized to clap's `--name`
//! form before parsing. Diagnostics are printed in Russian.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, ValueEnum};

/// Printed when the binary is started without arguments.
pub const USAGE: &str = "\
Запуск скрипта требует обязательного указания аргументов:
 -action crypt
\tШифрование пароля
\t-value2crypt <значение>
\t\tЗначение для шифрования
 -action run
\tЗапуск основной логики скрипта
\t-config <путь>
\t\tФайл конфигурации (по умолчанию application.yml)";

pub const CRYPT_NEEDS_VALUE: &str = "ОШИБКА: В случае использования значения \"crypt\" для аргумента -action обязательно должен быть указан аргумент -value2crypt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Encrypt `-value2crypt` for use in the configuration file.
    Crypt,
    /// Produce and mail the report.
    Run,
}

#[derive(Debug, Parser)]
#[command(name = "covmon", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    #[arg(long, value_enum, ignore_case = true)]
    pub action: Action,
    #[arg(long = "value2crypt")]
    pub value2crypt: Option<String>,
    #[arg(long, default_value = "application.yml")]
    pub config: PathBuf,
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Parsed {
    /// No arguments: print [`USAGE`].
    Usage,
    /// Arguments were rejected; print the diagnostic.
    Invalid(String),
    /// A valid invocation.
    Cli(Cli),
}

/// Turn `-Name` into `--name`; values are left alone.
fn normalize(arg: String) -> String {
    let rest = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))
        .filter(|r| r.starts_with(|c: char| c.is_ascii_alphabetic()));
    match rest {
        Some(name) => format!("--{}", name.to_ascii_lowercase()),
        None => arg,
    }
}

/// Parse the full argument vector, program name first.
pub fn parse<I>(args: I) -> Parsed
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "covmon".to_string());
    let rest: Vec<String> = args.map(normalize).collect();
    if rest.is_empty() {
        return Parsed::Usage;
    }
    let argv = std::iter::once(program).chain(rest).map(OsString::from);
    match Cli::try_parse_from(argv) {
        Ok(cli) => Parsed::Cli(cli),
        Err(e) => Parsed::Invalid(diagnostic(&e)),
    }
}

fn context(e: &clap::Error, kind: ContextKind) -> String {
    match e.get(kind) {
        Some(ContextValue::String(s)) => s.clone(),
        Some(ContextValue::Strings(v)) => v.join(", "),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn diagnostic(e: &clap::Error) -> String {
    let arg = context(e, ContextKind::InvalidArg);
    let arg = arg.split_whitespace().next().unwrap_or_default().replacen("--", "-", 1);
    match e.kind() {
        ErrorKind::InvalidValue if context(e, ContextKind::InvalidValue).is_empty() => {
            format!("ОШИБКА: Значение аргумента {arg} не определено")
        }
        ErrorKind::InvalidValue => format!(
            "ОШИБКА: Недопустимое значение {} аргумента {arg}; допустимые значения: crypt, run",
            context(e, ContextKind::InvalidValue)
        ),
        ErrorKind::UnknownArgument if arg.starts_with('-') => {
            format!("ОШИБКА: Параметр {arg} не определен. Доступные параметры: -action -value2crypt -config")
        }
        ErrorKind::UnknownArgument => format!("ОШИБКА: Аргумент {arg} не найден"),
        ErrorKind::MissingRequiredArgument => {
            "ОШИБКА: Не указан обязательный аргумент -action".to_string()
        }
        ErrorKind::ArgumentConflict => format!("ОШИБКА: Аргумент {arg} указан повторно"),
        _ => format!("ОШИБКА: {}", e.kind()),
    }
}
