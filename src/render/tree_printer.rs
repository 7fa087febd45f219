use colored::Colorize;
use supports_color::Stream;

use crate::tree::{ClockPolicy, Node, Update, UpdateTree};

const INDENT: &str = "  ";

/// Renders a tree as text, one line per node with both sides' records.
#[derive(Debug, Clone, Copy)]
pub struct TreePrinter {
    use_color: bool,
    only_diff: bool,
}

impl TreePrinter {
    /// Colours the output when stdout supports it.
    pub fn new(only_diff: bool) -> Self {
        Self {
            use_color: supports_color::on(Stream::Stdout).is_some(),
            only_diff,
        }
    }

    pub fn with_color(self, use_color: bool) -> Self {
        Self { use_color, ..self }
    }

    pub fn render<C: ClockPolicy>(&self, tree: &UpdateTree<C>) -> String {
        let mut output = String::new();
        tree.visit(|node| {
            if node.is_vestige() || (self.only_diff && !node.disagrees()) {
                return;
            }
            output.push_str(&self.line(node));
            output.push('\n');
        });
        output
    }

    fn line(&self, node: &Node) -> String {
        let label = if node.is_root() {
            ".".to_string()
        } else if self.only_diff {
            node.path().to_string()
        } else {
            let depth = node.path().matches('/').count() + 1;
            format!("{}{}", INDENT.repeat(depth), node.name())
        };

        let local = describe(node.local());
        let remote = describe(node.remote());
        let mut line = format!(
            "{}  local: {}  remote: {}",
            self.paint(&label, |s| s.bold()),
            local,
            remote
        );
        if node.disagrees() {
            line.push_str("  ");
            line.push_str(&self.paint("!=", |s| s.red().bold()));
        }
        line
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> colored::ColoredString) -> String {
        if self.use_color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn describe(record: Option<&Update>) -> String {
    let Some(record) = record else {
        return "-".to_string();
    };
    let kind = if record.is_delete() {
        "deleted".to_string()
    } else if record.is_directory() {
        "dir".to_string()
    } else if !record.symlink().is_empty() {
        format!("symlink -> {}", record.symlink())
    } else {
        "file".to_string()
    };
    format!("{kind}@{}", record.mod_time())
}
