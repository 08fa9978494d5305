//! Tree-to-text rendering.

use rosetta_ir::{ensure_sufficient_stack, Node, NodePath, PathSegment, TranslateError};

use crate::fields::{field, Field, Separator};
use crate::template::{Piece, TemplateLine, TemplateSet, INDENT_WIDTH};

/// Render a resolved tree with a target's templates.
///
/// Trailing whitespace is stripped from every line of the result.
#[tracing::instrument(level = "debug", skip_all, fields(target = templates.target()))]
pub fn render(node: &Node, templates: &TemplateSet) -> Result<String, TranslateError> {
    let mut renderer = Renderer::new(templates);
    let text = renderer.render(node)?;
    tracing::debug!(bytes = text.len(), "render complete");
    Ok(text
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Renderer state for one tree.
///
/// Every rendered fragment's first line is unindented (it continues whatever
/// line it is placed on); its following lines carry the absolute
/// indentation of the enclosing context.
pub struct Renderer<'a> {
    templates: &'a TemplateSet,
    /// Indent levels pushed by the template lines currently being expanded.
    indents: Vec<usize>,
    path: Vec<PathSegment>,
}

impl<'a> Renderer<'a> {
    pub fn new(templates: &'a TemplateSet) -> Self {
        Self {
            templates,
            indents: Vec::new(),
            path: Vec::new(),
        }
    }

    /// A renderer whose error paths start at `path` instead of the root.
    pub fn at(templates: &'a TemplateSet, path: &[PathSegment]) -> Self {
        Self {
            templates,
            indents: Vec::new(),
            path: path.to_vec(),
        }
    }

    /// Render `node` and everything below it.
    pub fn render(&mut self, node: &Node) -> Result<String, TranslateError> {
        ensure_sufficient_stack(|| self.render_node(node))
    }

    fn depth(&self) -> usize {
        self.indents.iter().sum()
    }

    fn indentation(&self, extra: usize) -> String {
        " ".repeat((self.depth() + extra) * INDENT_WIDTH)
    }

    fn missing_template(&self, node: &Node, field: Option<&str>) -> TranslateError {
        TranslateError::MissingTemplate {
            target: self.templates.target().to_string(),
            kind: node.tag(),
            field: field.map(str::to_string),
            path: NodePath::from_segments(self.path.iter().copied()),
        }
    }

    fn render_node(&mut self, node: &Node) -> Result<String, TranslateError> {
        let templates = self.templates;
        let Some(template) = templates.get(node.tag()) else {
            return Err(self.missing_template(node, None));
        };

        let mut out = String::new();
        for (i, line) in template.lines().iter().enumerate() {
            if i > 0 {
                out.push('\n');
                if !line.pieces.is_empty() {
                    out.push_str(&self.indentation(line.level));
                }
            } else {
                out.push_str(&" ".repeat(line.level * INDENT_WIDTH));
            }

            self.indents.push(line.level);
            let expanded = self.expand_line(node, line);
            self.indents.pop();
            out.push_str(&expanded?);
        }
        Ok(out)
    }

    fn expand_line(&mut self, node: &Node, line: &TemplateLine) -> Result<String, TranslateError> {
        let mut out = String::new();
        for piece in &line.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Field(name) => {
                    let Some(value) = field(node, name) else {
                        return Err(self.missing_template(node, Some(name)));
                    };
                    out.push_str(&self.render_field(value)?);
                }
            }
        }
        Ok(out)
    }

    fn render_field(&mut self, value: Field<'_>) -> Result<String, TranslateError> {
        match value {
            Field::Text(text) => Ok(text.into_owned()),
            Field::Node(name, child) => self.render_child(PathSegment::Field(name), child),
            Field::Nodes(name, children, separator) => {
                let joiner = match separator {
                    Separator::Comma => ", ".to_string(),
                    Separator::Line => format!("\n{}", self.indentation(0)),
                };
                let mut parts = Vec::with_capacity(children.len());
                for (i, child) in children.iter().enumerate() {
                    parts.push(self.render_child(PathSegment::Item(name, i), child)?);
                }
                Ok(parts.join(&joiner))
            }
        }
    }

    fn render_child(&mut self, segment: PathSegment, child: &Node) -> Result<String, TranslateError> {
        self.path.push(segment);
        let result = self.render(child);
        self.path.pop();
        result
    }
}

#[cfg(test)]
mod tests;
