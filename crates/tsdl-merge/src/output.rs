//! Per-symbol declaration units and group bundles.

use tsdl_common::output_file_stem;
use tsdl_parser::Printer;

use crate::merge::MergedUnit;

impl MergedUnit {
    /// `interface-Window`, `variable-___console`, ...
    pub fn file_stem(&self) -> String {
        output_file_stem(self.kind, &self.name)
    }

    pub fn file_name(&self) -> String {
        format!("{}.d.ts", self.file_stem())
    }

    /// Declaration-file text of this unit.
    pub fn render(&self) -> String {
        let mut printer = Printer::new();
        printer.print_statements(&self.statements);
        printer.finish()
    }
}

/// Concatenate rendered units in file-name order.
pub fn bundle(units: &[MergedUnit]) -> String {
    let mut ordered: Vec<(String, &MergedUnit)> =
        units.iter().map(|unit| (unit.file_name(), unit)).collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0));
    ordered
        .into_iter()
        .map(|(_, unit)| unit.render())
        .collect()
}
