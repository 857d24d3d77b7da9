use crate::config::Config;
use crate::formatting::FormatContext;

mod content;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Command,
    Keys,
    Environment,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Command => "Commands",
            Section::Keys => "Browser",
            Section::Environment => "Environment",
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct HelpTopic<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub usage: &'a str,
    pub details: &'a [&'a str],
    pub section: Section,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub topics: &'a [HelpTopic<'a>],
    pub footer: &'a [&'a str],
}

impl<'a> HelpBook<'a> {
    fn find(&self, name: &str) -> Option<&HelpTopic<'a>> {
        self.topics.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    fn in_section(
        &self,
        section: Section,
    ) -> impl Iterator<Item = &HelpTopic<'a>> {
        self.topics.iter().filter(move |t| t.section == section)
    }
}

/// Help lines for `nn help [topic]`, followed by the active configuration.
pub fn render(
    args: &[String],
    config: Option<&Config>,
    ctx: &FormatContext,
) -> Vec<String> {
    let book = content::book();
    let width = terminal_columns().unwrap_or(96).clamp(64, 120);
    let printer = HelpPrinter::new(width, ctx);

    let mut lines = match args.first() {
        None => printer.render_overview(&book),
        Some(topic) => match book.find(topic) {
            Some(entry) => printer.render_topic(entry),
            None => {
                eprintln!("Unknown help topic: {topic}");
                printer.render_overview(&book)
            }
        },
    };
    if let Some(config) = config {
        lines.extend(printer.render_config(config));
    }
    lines
}

fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

struct HelpPrinter<'c> {
    width: usize,
    ctx: &'c FormatContext,
}

impl<'c> HelpPrinter<'c> {
    fn new(width: usize, ctx: &'c FormatContext) -> Self {
        Self { width, ctx }
    }

    fn render_overview(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = Vec::new();
        out.push(self.ctx.format_header(book.title));
        out.push(format!("usage: {}", book.usage));
        out.push(String::new());

        for section in [Section::Command, Section::Keys, Section::Environment] {
            let rows: Vec<(String, String)> = book
                .in_section(section)
                .map(|t| (t.usage.to_string(), t.summary.to_string()))
                .collect();
            out.extend(self.render_block(section.label(), &rows));
        }

        for line in book.footer {
            out.extend(self.wrap(line, self.width));
        }
        out
    }

    fn render_topic(&self, topic: &HelpTopic<'_>) -> Vec<String> {
        let mut out = Vec::new();
        out.push(self.ctx.format_header(&format!(
            "{}: {}",
            topic.name, topic.summary
        )));
        out.push(format!("usage: {}", topic.usage));
        out.push(String::new());
        for line in topic.details {
            out.extend(self.wrap(line, self.width));
        }
        if !topic.details.is_empty() {
            out.push(String::new());
        }
        out
    }

    fn render_config(&self, config: &Config) -> Vec<String> {
        vec![
            self.ctx.format_header("Configuration"),
            String::new(),
            format!("  EDITOR           {}", self.ctx.format_value(&config.editor)),
            format!(
                "  Notes directory  {}",
                self.ctx.format_value(&config.notes_dir.display().to_string())
            ),
        ]
    }

    fn render_block(
        &self,
        title: &str,
        rows: &[(String, String)],
    ) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let min_desc = self.width / 2;
        let mut label_width =
            rows.iter().map(|r| r.0.len()).max().unwrap_or(0).min(24);
        if label_width + 4 + min_desc > self.width {
            label_width = self.width.saturating_sub(min_desc + 4);
        }
        let desc_width =
            self.width.saturating_sub(2 + label_width + 2).max(min_desc);

        out.push(format!("{}:", self.ctx.format_header(title)));
        for (label, desc) in rows {
            let label_lines = self.wrap(label, label_width);
            let desc_lines = self.wrap(desc, desc_width);
            let rows = label_lines.len().max(desc_lines.len());
            for idx in 0..rows {
                let l = label_lines.get(idx).map(String::as_str).unwrap_or("");
                let d = desc_lines.get(idx).map(String::as_str).unwrap_or("");
                out.push(format!("  {l:label_width$}  {d}"));
            }
        }
        out.push(String::new());
        out
    }

    fn wrap(&self, text: &str, width: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            if line.len() + 1 + word.len() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                out.push(line);
                line = word.to_string();
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
        if out.is_empty() {
            out.push(String::new());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plain() -> FormatContext {
        FormatContext::new(false)
    }

    #[test]
    fn test_overview_lists_every_command() {
        let text = render(&[], None, &plain()).join("\n");
        for cmd in ["nn init", "nn check", "nn new", "nn sync", "nn show", "nn help"] {
            assert!(text.contains(cmd), "missing {cmd}");
        }
        assert!(text.contains("NNDIR"));
    }

    #[test]
    fn test_topic_lookup_is_case_insensitive() {
        let text = render(&["SHOW".to_string()], None, &plain()).join("\n");
        assert!(text.starts_with("show: "));
        assert!(text.contains("tree"));
    }

    #[test]
    fn test_config_block_appended() {
        let cfg = Config {
            editor: "nano".to_string(),
            notes_dir: PathBuf::from("/tmp/notes"),
        };
        let text = render(&[], Some(&cfg), &plain()).join("\n");
        assert!(text.contains("Configuration"));
        assert!(text.contains("EDITOR           nano"));
        assert!(text.contains("Notes directory  /tmp/notes"));
    }

    #[test]
    fn test_wrap_respects_width() {
        let ctx = plain();
        let printer = HelpPrinter::new(64, &ctx);
        let lines = printer.wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }
}
