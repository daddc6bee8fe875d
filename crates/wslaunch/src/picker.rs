//! Line-oriented picker: type to narrow the list, a number to open an entry.
//!
//! The list is scanned once; filtering works on the cached scan and only
//! `:r` goes back to the filesystem.

use std::io::{BufRead, Write};

use wl_workspace::{WorkspaceCatalog, WorkspaceRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerCommand {
    /// Replace the filter text. Empty clears it.
    Filter(String),
    /// Open the entry with this 1-based index in the current list.
    Select(usize),
    Refresh,
    Quit,
}

pub fn parse_command(line: &str) -> PickerCommand {
    let line = line.trim();
    match line {
        ":q" | ":quit" => PickerCommand::Quit,
        ":r" | ":refresh" => PickerCommand::Refresh,
        _ => match line.parse::<usize>() {
            Ok(index) => PickerCommand::Select(index),
            Err(_) => PickerCommand::Filter(line.to_string()),
        },
    }
}

fn render<W: Write>(out: &mut W, filter: &str, entries: &[&WorkspaceRecord]) -> std::io::Result<()> {
    writeln!(out)?;
    if entries.is_empty() {
        writeln!(out, "  (no workspaces)")?;
    }
    for (i, workspace) in entries.iter().enumerate() {
        writeln!(out, "{:>3}  {}", i + 1, workspace.display_name())?;
    }
    if filter.is_empty() {
        write!(out, "filter> ")?;
    } else {
        write!(out, "filter [{filter}]> ")?;
    }
    out.flush()
}

/// Run the picker until `:q` or end of input. `on_select` is called for each
/// chosen workspace; an error from it is printed and the picker keeps going.
pub fn run<R, W, F>(
    catalog: &mut WorkspaceCatalog,
    input: R,
    out: &mut W,
    mut on_select: F,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&WorkspaceRecord) -> anyhow::Result<()>,
{
    let mut filter = String::new();
    let mut lines = input.lines();
    loop {
        let entries = catalog.filter(&filter);
        render(out, &filter, &entries)?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            return Ok(());
        };

        match parse_command(&line) {
            PickerCommand::Quit => return Ok(()),
            PickerCommand::Refresh => {
                catalog.scan();
            }
            PickerCommand::Select(index) => match index.checked_sub(1).and_then(|i| entries.get(i)) {
                Some(workspace) => {
                    if let Err(e) = on_select(workspace) {
                        writeln!(out, "error: {e:#}")?;
                    }
                }
                None => writeln!(out, "No entry {index}")?,
            },
            PickerCommand::Filter(text) => filter = text,
        }
    }
}
