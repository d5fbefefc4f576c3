//! `completions` command handler.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionsArgs};

/// Name completions are registered under.
const BIN_NAME: &str = "govdocs";

/// Print the completion script for `args.shell` to stdout.
pub fn run(args: &CompletionsArgs) {
    write_completions(args.shell, &mut io::stdout().lock());
}

/// Write the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut out = Vec::new();
        write_completions(shell, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn bash_script_knows_subcommands() {
        let script = script(Shell::Bash);
        for subcommand in ["serve", "build", "list", "check"] {
            assert!(script.contains(subcommand), "missing {subcommand}");
        }
    }

    #[test]
    fn every_shell_produces_a_script() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(script(shell).contains(BIN_NAME), "{shell:?}");
        }
    }
}
