//! Line-preserving editing of an existing INI file
//!
//! The file is kept as its original lines grouped by section. Only the keys the
//! generator sets are rewritten; comments, spacing, quoting and escapes of
//! everything else survive untouched.

/// A section header with the lines following it up to the next header
#[derive(Debug, Clone)]
struct RawSection {
    name: String,
    header: String,
    lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ConfigDocument {
    /// Lines before the first section header
    preamble: Vec<String>,
    sections: Vec<RawSection>,
    line_ending: &'static str,
}

/// Section name of a `[name]` header line
fn header_name(line: &str) -> Option<&str> {
    let inner = line.trim().strip_prefix('[')?;
    let (name, _) = inner.split_once(']')?;
    Some(name.trim())
}

/// Key of a top-level `key = value` line. Indented lines belong to a
/// nested sub-section (e.g. `s3 =`) and never match.
fn line_key(line: &str) -> Option<&str> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    if line.starts_with('#') || line.starts_with(';') {
        return None;
    }
    line.split_once('=').map(|(key, _)| key.trim())
}

impl ConfigDocument {
    pub(crate) fn parse(text: &str) -> Self {
        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let mut document = Self {
            preamble: Vec::new(),
            sections: Vec::new(),
            line_ending,
        };

        for line in text.lines() {
            if let Some(name) = header_name(line) {
                document.sections.push(RawSection {
                    name: name.to_string(),
                    header: line.to_string(),
                    lines: Vec::new(),
                });
            } else if let Some(section) = document.sections.last_mut() {
                section.lines.push(line.to_string());
            } else {
                document.preamble.push(line.to_string());
            }
        }

        document
    }

    /// Drop everything outside the section `name`, preamble comments included.
    pub(crate) fn retain_only(&mut self, name: &str) {
        self.preamble.clear();
        self.sections.retain(|section| section.name == name);
    }

    /// Set `key` in the first section called `name`, appending the section if
    /// it does not exist yet. An existing line for the key is replaced in place.
    pub(crate) fn set(&mut self, name: &str, key: &str, value: &str) {
        let line = format!("{key} = {value}");
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => self.append_section(name),
        };
        let section = &mut self.sections[index];

        if let Some(existing) = section
            .lines
            .iter_mut()
            .find(|existing| line_key(existing.as_str()) == Some(key))
        {
            *existing = line;
            return;
        }

        // keep trailing blank lines as the separator to the next section
        let insert_at = section
            .lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);
        section.lines.insert(insert_at, line);
    }

    fn append_section(&mut self, name: &str) -> usize {
        let last_line = match self.sections.last() {
            Some(section) => section.lines.last().unwrap_or(&section.header).as_str(),
            None => self.preamble.last().map_or("", String::as_str),
        };
        if !last_line.trim().is_empty() {
            match self.sections.last_mut() {
                Some(section) => section.lines.push(String::new()),
                None => self.preamble.push(String::new()),
            }
        }

        self.sections.push(RawSection {
            name: name.to_string(),
            header: format!("[{name}]"),
            lines: Vec::new(),
        });
        self.sections.len() - 1
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        let lines = self.preamble.iter().chain(
            self.sections
                .iter()
                .flat_map(|s| std::iter::once(&s.header).chain(s.lines.iter())),
        );
        for line in lines {
            out.push_str(line);
            out.push_str(self.line_ending);
        }
        out
    }
}
