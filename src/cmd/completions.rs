//! Completions command implementation
//!
//! Handles the `sizewatch completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// ```bash
/// sizewatch completions bash > /etc/bash_completion.d/sizewatch
/// sizewatch completions zsh > ~/.zfunc/_sizewatch
/// sizewatch completions fish > ~/.config/fish/completions/sizewatch.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

/// Generate completions into any writer
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
