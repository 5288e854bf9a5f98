use crate::parse::cart::reconstruct_carts;
use crate::parse::catalog::resolve_categories;
use crate::parse::classify::{DEFAULT_LEVEL_MARKER, LineClassifier};
use crate::parse::error::ParseError;
use crate::parse::extract::{extract_cart_requests, extract_goods_views};
use crate::parse::group::{ClientGroup, ClientGroups};
use crate::parse::types::{CartEvent, CartRecord, CategoryCatalog, GoodsViewEvent, ParsedLog};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Token preceding `: <client_id>` on every line.
    pub level_marker: String,
    /// Threads used to derive events once lines are grouped.
    pub workers: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            level_marker: DEFAULT_LEVEL_MARKER.to_string(),
            workers: 1,
        }
    }
}

/// Turns raw access-log text into typed shop events.
///
/// Holds no state between runs: every call reads a fresh input and returns a
/// fresh [`ParsedLog`], so one parser can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct LogParser {
    classifier: LineClassifier,
    workers: usize,
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new(&ParserOptions::default())
    }
}

impl LogParser {
    pub fn new(options: &ParserOptions) -> Self {
        Self {
            classifier: LineClassifier::new(&options.level_marker),
            workers: options.workers.max(1),
        }
    }

    //-------------------------------------------------------------------------
    // Grouping (single sequential pass)
    //-------------------------------------------------------------------------

    pub fn group_reader<R: BufRead>(&self, reader: R) -> Result<ClientGroups, ParseError> {
        let mut groups = ClientGroups::new();

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|source| ParseError::Read { line_no, source })?;
            let raw = line.trim_end_matches('\r');

            if raw.trim().is_empty() {
                continue;
            }

            groups.push(self.classifier.classify(line_no, raw)?);
        }

        Ok(groups)
    }

    pub fn group_str(&self, input: &str) -> Result<ClientGroups, ParseError> {
        self.group_reader(input.as_bytes())
    }

    pub fn group_file(&self, path: &Path) -> Result<ClientGroups, ParseError> {
        let file = File::open(path).map_err(|e| ParseError::read_file(path, e))?;
        self.group_reader(BufReader::new(file))
    }

    //-------------------------------------------------------------------------
    // Full runs
    //-------------------------------------------------------------------------

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParsedLog, ParseError> {
        let groups = self.group_reader(reader)?;
        self.derive(&groups)
    }

    pub fn parse_str(&self, input: &str) -> Result<ParsedLog, ParseError> {
        self.parse_reader(input.as_bytes())
    }

    pub fn parse_file(&self, path: &Path) -> Result<ParsedLog, ParseError> {
        info!(path = %path.display(), "parsing log file");
        let groups = self.group_file(path)?;
        self.derive(&groups)
    }

    /// Derives every event collection from already grouped lines.
    pub fn derive(&self, groups: &ClientGroups) -> Result<ParsedLog, ParseError> {
        let chunks = if self.workers <= 1 || groups.len() <= 1 {
            vec![derive_chunk(groups.as_slice())]
        } else {
            derive_parallel(groups.as_slice(), self.workers)?
        };

        let mut parsed = ParsedLog {
            clients: groups.client_ids(),
            ..ParsedLog::default()
        };

        for chunk in chunks {
            parsed.categories.merge(chunk.categories);
            parsed.cart_requests.extend(chunk.cart_requests);
            parsed.carts.extend(chunk.carts);
            parsed.goods_views.extend(chunk.goods_views);
        }

        info!(
            clients = parsed.clients.len(),
            lines = groups.line_count(),
            categories = parsed.categories.len(),
            carts = parsed.carts.len(),
            cart_requests = parsed.cart_requests.len(),
            goods_views = parsed.goods_views.len(),
            "parsed log"
        );

        Ok(parsed)
    }
}

//-----------------------------------------------------------------------------
// Per-client derivation
//-----------------------------------------------------------------------------

#[derive(Default)]
struct ChunkOutput {
    categories: CategoryCatalog,
    cart_requests: Vec<CartEvent>,
    carts: Vec<CartRecord>,
    goods_views: Vec<GoodsViewEvent>,
}

fn derive_chunk(groups: &[ClientGroup]) -> ChunkOutput {
    let mut out = ChunkOutput::default();

    for group in groups {
        resolve_categories(group, &mut out.categories);
        out.carts.extend(reconstruct_carts(group));
        out.cart_requests.extend(extract_cart_requests(group));
        out.goods_views.extend(extract_goods_views(group));
    }

    out
}

/// Splits clients into contiguous chunks, one per worker. Outputs come back in
/// chunk order, so the merged result matches a sequential run.
fn derive_parallel(groups: &[ClientGroup], workers: usize) -> Result<Vec<ChunkOutput>, ParseError> {
    let chunk_size = groups.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles = groups
            .chunks(chunk_size)
            .enumerate()
            .map(|(worker, chunk)| {
                thread::Builder::new()
                    .name(format!("shoplog-derive-{worker}"))
                    .spawn_scoped(scope, move || {
                        debug!(worker, clients = chunk.len(), "deriving client chunk");
                        derive_chunk(chunk)
                    })
                    .map_err(ParseError::Spawn)
            })
            .collect::<Result<Vec<_>, _>>()?;

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| ParseError::WorkerPanicked))
            .collect()
    })
}
