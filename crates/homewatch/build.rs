//! Renders `homewatch.1` and one `homewatch-<sub>.1` page per visible
//! subcommand into `$OUT_DIR/man`.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

// The argument definitions need nothing beyond the build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::other("OUT_DIR is only set when run by cargo"))?;
    let man_dir = out_dir.join("man");
    std::fs::create_dir_all(&man_dir)?;

    // Pages are named after their full command path, e.g. `homewatch-arm`.
    let mut pending = vec![cli::Cli::command()];
    while let Some(cmd) = pending.pop() {
        let prefix = cmd.get_name().to_owned();
        pending.extend(
            cmd.get_subcommands()
                .filter(|sub| !sub.is_hide_set())
                .map(|sub| sub.clone().name(format!("{prefix}-{}", sub.get_name()))),
        );
        write_page(cmd, &man_dir)?;
    }
    Ok(())
}

fn write_page(cmd: clap::Command, dir: &Path) -> io::Result<()> {
    let path = dir.join(format!("{}.1", cmd.get_name()));
    let mut page = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut page)?;
    std::fs::write(path, page)
}
