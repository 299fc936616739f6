//! command-gate - Pre-execution hook that blocks forbidden shell commands
//!
//! # Usage
//!
//! ```bash
//! # As a Claude Code hook (reads JSON from stdin)
//! echo '{"tool_name":"Bash","tool_input":{"command":"git push"}}' | command-gate
//!
//! # Check a command directly
//! command-gate --check 'cd app && npm install'
//! command-gate -- git push origin main
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use command_gate::{
    audit::{AuditEntry, AuditLogger},
    config::{Config, Mode},
    engine::CommandGate,
    input::HookInput,
    output::{Decision, OutputFormat, Response, EXIT_BLOCKED, EXIT_PROCEED},
};

/// Print version information
fn print_version() {
    println!("command-gate {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"command-gate - Block forbidden shell commands before they run

USAGE:
    command-gate [OPTIONS] [-- COMMAND...]

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file
    -d, --dry-run           Report blocks without enforcing them
    -f, --format FORMAT     Output format: exit-code (default), json
        --check COMMAND     Evaluate COMMAND instead of reading a hook payload
        --list-rules        Print the active rules
    -- COMMAND...           Evaluate the words after -- as one command line

EXIT STATUS:
    0   command may proceed
    2   command blocked (reason on stderr)

ENVIRONMENT:
    COMMAND_GATE_DISABLED=1   Disable all checks (still logs)
    COMMAND_GATE_WARN_ONLY=1  Warn but don't block

USAGE AS HOOK:
    Configure in ~/.claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Bash",
          "hooks": [{{ "type": "command", "command": "~/.claude/command-gate/command-gate" }}]
        }}]
      }}
    }}
"#
    );
}

/// Parse command line arguments
#[derive(Default)]
struct Args {
    help: bool,
    version: bool,
    dry_run: bool,
    list_rules: bool,
    config_path: Option<String>,
    format: OutputFormat,
    check: Option<String>,
    trailing: Vec<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-d" | "--dry-run" => result.dry_run = true,
                "--list-rules" => result.list_rules = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                "-f" | "--format" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.set_format(&args[i]);
                    }
                }
                "--check" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.check = Some(args[i].clone());
                    }
                }
                "--" => {
                    result.trailing = args[i + 1..].to_vec();
                    break;
                }
                arg if arg.starts_with("--config=") => {
                    result.config_path = Some(arg.trim_start_matches("--config=").to_string());
                }
                arg if arg.starts_with("--format=") => {
                    result.set_format(arg.trim_start_matches("--format="));
                }
                arg if arg.starts_with("--check=") => {
                    result.check = Some(arg.trim_start_matches("--check=").to_string());
                }
                arg => eprintln!("Warning: Ignoring unknown argument: {}", arg),
            }
            i += 1;
        }

        result
    }

    fn set_format(&mut self, value: &str) {
        match OutputFormat::parse(value) {
            Some(format) => self.format = format,
            None => eprintln!("Warning: Unknown format '{}', using exit-code", value),
        }
    }

    /// Command given on the command line, if any
    fn direct_command(&self) -> Option<String> {
        if let Some(ref command) = self.check {
            return Some(command.clone());
        }
        if self.trailing.is_empty() {
            return None;
        }
        // Re-quote so each argument stays one word
        let joined = shlex::try_join(self.trailing.iter().map(String::as_str))
            .unwrap_or_else(|_| self.trailing.join(" "));
        Some(joined)
    }
}

fn load_config(args: &Args) -> Config {
    match args.config_path {
        Some(ref path) => Config::load_from(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config from {}: {}", path, e);
            Config::default()
        }),
        None => Config::load(),
    }
}

fn build_gate(config: &Config, dry_run: bool) -> CommandGate {
    let gate = CommandGate::new(config).unwrap_or_else(|e| {
        eprintln!("Warning: Invalid rule configuration ({}), using built-in rules", e);
        CommandGate::with_builtin_rules(config)
    });

    if dry_run && gate.mode() == Mode::Enforce {
        gate.with_mode(Mode::WarnOnly)
    } else {
        gate
    }
}

fn print_rules(gate: &CommandGate) {
    for rule in gate.rules() {
        println!("{:<16} {:<24} {}", rule.id, rule.pattern.join(" "), rule.message);
    }
}

/// Evaluate a command given on the command line
fn run_direct(gate: &CommandGate, command: &str) -> ExitCode {
    match gate.evaluate(command) {
        Decision::Allow => {
            println!("ALLOW");
            ExitCode::from(EXIT_PROCEED)
        }
        Decision::Block { rule_id, reason } => {
            println!("BLOCK [{}]: {}", rule_id, reason);
            if gate.mode() == Mode::Enforce {
                ExitCode::from(EXIT_BLOCKED)
            } else {
                ExitCode::from(EXIT_PROCEED)
            }
        }
    }
}

/// Read the hook payload; empty input counts as unreadable
fn read_payload() -> Result<HookInput, String> {
    let mut payload = String::new();
    io::stdin()
        .read_to_string(&mut payload)
        .map_err(|e| format!("failed to read stdin: {}", e))?;

    if payload.trim().is_empty() {
        return Err("empty hook payload".to_string());
    }

    HookInput::from_json(&payload).map_err(|e| e.to_string())
}

fn emit(response: &Response) -> ExitCode {
    if let Some(ref message) = response.stderr {
        eprintln!("{}", message);
    }
    if let Some(ref json) = response.stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = writeln!(handle, "{}", json).and_then(|_| handle.flush()) {
            eprintln!("Warning: Failed to write response: {}", e);
        }
    }
    ExitCode::from(response.exit_code)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let config = load_config(&args);
    let gate = build_gate(&config, args.dry_run);

    if args.list_rules {
        print_rules(&gate);
        return ExitCode::SUCCESS;
    }

    if let Some(command) = args.direct_command() {
        return run_direct(&gate, &command);
    }

    let mut logger = AuditLogger::new(config.audit_path().as_deref());

    let decision = match read_payload() {
        Ok(input) => {
            let decision = gate.check(&input);
            if let Err(e) = logger.log_decision(&input, &decision, gate.mode()) {
                eprintln!("Warning: Failed to write audit log: {}", e);
            }
            decision
        }
        Err(error) => {
            let decision = gate.unreadable(&error);
            if let Err(e) = logger.log(&AuditEntry::unreadable(&error, &decision)) {
                eprintln!("Warning: Failed to write audit log: {}", e);
            }
            decision
        }
    };

    emit(&Response::render(&decision, gate.mode(), args.format))
}
