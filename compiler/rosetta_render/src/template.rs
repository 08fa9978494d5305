//! Templates and per-target template sets.

use rosetta_ir::NodeTag;
use rustc_hash::FxHashMap;

/// Spaces per indent level.
pub(crate) const INDENT_WIDTH: usize = 4;

/// A piece of a template line.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Piece {
    Text(String),
    /// `%{name}`
    Field(String),
}

/// One line of a template.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TemplateLine {
    /// Indent levels relative to the template's first line.
    pub level: usize,
    pub pieces: Vec<Piece>,
}

/// A textual pattern for one node kind.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Template {
    lines: Vec<TemplateLine>,
    indented: bool,
}

impl Template {
    /// A template used verbatim; whitespace is literal text.
    pub fn inline(text: &str) -> Self {
        Self {
            lines: text
                .split('\n')
                .map(|line| TemplateLine {
                    level: 0,
                    pieces: parse_pieces(line),
                })
                .collect(),
            indented: false,
        }
    }

    /// A multi-line template whose own indentation is structural.
    ///
    /// Leading and trailing blank lines are dropped and the common leading
    /// indentation removed. What remains of each line's leading whitespace
    /// becomes its indent level; spaces short of a full level stay literal.
    pub fn indented(text: &str) -> Self {
        let raw: Vec<&str> = text.lines().collect();
        let first = raw.iter().position(|line| !line.trim().is_empty());
        let last = raw.iter().rposition(|line| !line.trim().is_empty());
        let body = match (first, last) {
            (Some(first), Some(last)) => &raw[first..=last],
            _ => &[][..],
        };

        let common = body
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| indent_columns(line))
            .min()
            .unwrap_or(0);

        let lines = body
            .iter()
            .map(|line| {
                if line.trim().is_empty() {
                    return TemplateLine::default();
                }
                let extra = indent_columns(line) - common;
                let mut text = " ".repeat(extra % INDENT_WIDTH);
                text.push_str(line.trim_start_matches([' ', '\t']));
                TemplateLine {
                    level: extra / INDENT_WIDTH,
                    pieces: parse_pieces(&text),
                }
            })
            .collect();

        Self {
            lines,
            indented: true,
        }
    }

    pub fn lines(&self) -> &[TemplateLine] {
        &self.lines
    }

    pub fn is_indented(&self) -> bool {
        self.indented
    }

    /// Field names referenced by the template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .flat_map(|line| &line.pieces)
            .filter_map(|piece| match piece {
                Piece::Field(name) => Some(name.as_str()),
                Piece::Text(_) => None,
            })
    }
}

/// Indent width of `line` in columns. A tab counts as one level.
fn indent_columns(line: &str) -> usize {
    line.chars()
        .map_while(|c| match c {
            ' ' => Some(1),
            '\t' => Some(INDENT_WIDTH),
            _ => None,
        })
        .sum()
}

/// Split a line into text and `%{field}` pieces. `%%` is a literal `%`.
fn parse_pieces(line: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '%' {
            text.push(c);
            continue;
        }
        match chars.peek() {
            Some((_, '%')) => {
                chars.next();
                text.push('%');
            }
            Some((_, '{')) => {
                let rest = &line[i + 2..];
                match rest.find('}') {
                    Some(end) if end > 0 => {
                        if !text.is_empty() {
                            pieces.push(Piece::Text(std::mem::take(&mut text)));
                        }
                        pieces.push(Piece::Field(rest[..end].to_string()));
                        let close = i + 2 + end;
                        while chars.next_if(|&(j, _)| j <= close).is_some() {}
                    }
                    _ => text.push(c),
                }
            }
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        pieces.push(Piece::Text(text));
    }
    pieces
}

/// A second template was registered for a node kind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("[{target}] template for `{kind}` is already defined")]
pub struct DuplicateTemplate {
    pub target: String,
    pub kind: NodeTag,
}

/// All templates of one target, keyed directly by node kind.
#[derive(Clone, Debug)]
pub struct TemplateSet {
    target: String,
    templates: FxHashMap<NodeTag, Template>,
}

impl TemplateSet {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            templates: FxHashMap::default(),
        }
    }

    /// Build a set from `(kind, template)` entries.
    pub fn from_entries(
        target: impl Into<String>,
        entries: impl IntoIterator<Item = (NodeTag, Template)>,
    ) -> Result<Self, DuplicateTemplate> {
        let mut set = Self::new(target);
        for (kind, template) in entries {
            set.define(kind, template)?;
        }
        Ok(set)
    }

    /// Register the template for `kind`. At most one per kind.
    pub fn define(&mut self, kind: NodeTag, template: Template) -> Result<(), DuplicateTemplate> {
        if self.templates.contains_key(&kind) {
            return Err(DuplicateTemplate {
                target: self.target.clone(),
                kind,
            });
        }
        self.templates.insert(kind, template);
        Ok(())
    }

    pub fn get(&self, kind: NodeTag) -> Option<&Template> {
        self.templates.get(&kind)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
