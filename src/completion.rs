//! # Shell Completion Module
//!
//! Completion scripts for the `moodbox` binary. The mood argument
//! advertises its keys as possible values, so the zsh script completes
//! them without calling back into the binary. Other shells complete
//! subcommands and flags only.
//!
//! ```bash
//! moodbox completion bash > ~/.local/share/bash-completion/completions/moodbox
//! moodbox completion zsh > ~/.config/zsh/completions/_moodbox
//! ```

use crate::cli::Shell;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::{self, Write};

/// Write completions for `cmd` to `out`.
pub fn write_completions<G: Generator>(gen: G, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(gen, cmd, name, out);
}

/// Generate shell completions for the given shell on stdout
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    write_completions(gen, cmd, &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub const fn shell_to_completion_shell(shell: &Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::CommandFactory;

    fn render(shell: Shell) -> String {
        let mut cmd = Args::command();
        let mut out = Vec::new();
        write_completions(shell_to_completion_shell(&shell), &mut cmd, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_completion_mentions_subcommands() {
        let script = render(Shell::Bash);

        assert!(script.contains("_moodbox"));
        assert!(script.contains("recommend"));
        assert!(script.contains("mystery"));
    }

    #[test]
    fn test_zsh_completion_lists_moods() {
        let script = render(Shell::Zsh);

        assert!(script.contains("romantic"));
        assert!(script.contains("chill"));
    }

    #[test]
    fn test_every_shell_renders() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!render(shell).is_empty(), "{shell:?} produced no script");
        }
    }
}
