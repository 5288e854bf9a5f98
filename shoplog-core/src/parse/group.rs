use crate::parse::patterns::is_cart_related;
use crate::parse::types::{ClientId, LogLine};
use ahash::AHashMap;
use std::io::{self, Write};

/// All lines of one client, in input order, plus the cart-related subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientGroup {
    client_id: ClientId,
    lines: Vec<LogLine>,
    /// Indices into `lines`.
    cart_lines: Vec<usize>,
}

impl ClientGroup {
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            lines: Vec::new(),
            cart_lines: Vec::new(),
        }
    }

    fn push(&mut self, line: LogLine) {
        if is_cart_related(&line.raw) {
            self.cart_lines.push(self.lines.len());
        }
        self.lines.push(line);
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn cart_lines(&self) -> impl Iterator<Item = &LogLine> {
        self.cart_lines.iter().map(|i| &self.lines[*i])
    }

    pub fn cart_line_count(&self) -> usize {
        self.cart_lines.len()
    }
}

/// Client groups in first-seen order.
///
/// Built in a single pass over the input; line order inside a group is the
/// only record of request sequencing, so groups are never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientGroups {
    groups: Vec<ClientGroup>,
    index: AHashMap<ClientId, usize>,
    line_count: usize,
}

impl ClientGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: impl IntoIterator<Item = LogLine>) -> Self {
        let mut groups = Self::new();
        for line in lines {
            groups.push(line);
        }
        groups
    }

    pub fn push(&mut self, line: LogLine) {
        let slot = match self.index.get(&line.client_id) {
            Some(slot) => *slot,
            None => {
                let slot = self.groups.len();
                self.groups.push(ClientGroup::new(line.client_id.clone()));
                self.index.insert(line.client_id.clone(), slot);
                slot
            }
        };

        self.groups[slot].push(line);
        self.line_count += 1;
    }

    pub fn get(&self, client_id: &ClientId) -> Option<&ClientGroup> {
        self.index.get(client_id).map(|slot| &self.groups[*slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientGroup> {
        self.groups.iter()
    }

    pub fn as_slice(&self) -> &[ClientGroup] {
        &self.groups
    }

    pub fn client_ids(&self) -> Vec<ClientId> {
        self.groups.iter().map(|g| g.client_id.clone()).collect()
    }

    /// Number of clients.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn cart_line_count(&self) -> usize {
        self.groups.iter().map(ClientGroup::cart_line_count).sum()
    }

    /// Writes every line, grouped by client.
    pub fn write_all_lines<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.groups.iter().flat_map(|g| g.lines.iter()) {
            writeln!(out, "{}", line.raw)?;
        }
        Ok(())
    }

    /// Writes only the cart-related lines, grouped by client.
    pub fn write_cart_lines<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.groups.iter().flat_map(|g| g.cart_lines()) {
            writeln!(out, "{}", line.raw)?;
        }
        Ok(())
    }
}
