// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Pretty printers for reporting information.
use std::{borrow::Cow, sync::Mutex};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNING_PRINTER: Mutex<Blocks> = Mutex::new(Blocks::default());
}

/// Lines of text grouped into blocks. The first line of each block gets a
/// branch symbol, the others a vertical bar.
#[derive(Default)]
struct Blocks(Vec<Vec<Cow<'static, str>>>);

impl Blocks {
    /// Every warning gets a block of its own.
    fn push_warning(&mut self, warning: Cow<'static, str>) {
        self.0.push(vec![warning]);
    }

    fn symbolised_lines(&self) -> Vec<(char, &str)> {
        let num_blocks = self.0.len();
        let mut lines = vec![];
        for (i_block, block) in self.0.iter().enumerate() {
            let num_lines = block.len();
            for (i_line, line) in block.iter().enumerate() {
                let symbol = match (i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks) {
                    (0, false, _) => VERTICAL_AND_RIGHT,
                    (0, _, false) => VERTICAL_AND_RIGHT,
                    (0, true, true) => UP_AND_RIGHT,
                    _ => VERTICAL,
                };
                lines.push((symbol, line.as_ref()));
            }
        }
        lines
    }
}

pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Blocks,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: Blocks::default(),
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.0.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.0.push(block);
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(&self.title).bold());
        for (symbol, line) in self.blocks.symbolised_lines() {
            log::info!("{symbol} {line}");
        }
        log::info!("");
    }
}

/// Single-line warnings, shown by [`display_warnings`].
pub(crate) trait Warn: Into<Cow<'static, str>> {
    fn warn(self) {
        WARNING_PRINTER.lock().unwrap().push_warning(self.into());
    }
}

impl Warn for &'static str {}

impl Warn for String {}

/// Print out any warnings that have been collected while arguments were
/// parsed, then forget them.
pub(crate) fn display_warnings() {
    log::debug!("Displaying warnings");
    let mut printer = WARNING_PRINTER.lock().unwrap();
    if printer.0.is_empty() {
        return;
    }

    log::warn!("{}", console::style("Warnings").bold());
    for (symbol, line) in printer.symbolised_lines() {
        log::warn!("{symbol} {line}");
    }
    log::warn!("");
    printer.0.clear();
}
