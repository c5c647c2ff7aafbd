//! Reader for the map blocks of a GZDoom (Z)MAPINFO lump.
//!
//! Only `MAP <token> ... { key = value }` blocks are looked at; everything
//! else in the lump (episodes, clusters, gameinfo, ...) is skipped.

use std::collections::HashMap;

use wadport_types::{MapInfo, MapTable, OrdinalOrder};

/// Properties that survive into the map table.
const KEYS: [&str; 6] = ["titlepatch", "enterpic", "exitpic", "next", "secretnext", "music"];

const MAX_TOKEN_LEN: usize = 8;

/// A `MAP` block before post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MapBlock<'a> {
    token: &'a str,
    props: HashMap<String, String>,
}

/// Parse every map block of `text` and resolve its properties.
pub fn parse_mapinfo(text: &str, order: OrdinalOrder) -> MapTable {
    let mut blocks = scan_blocks(text);
    if order == OrdinalOrder::SortedByToken {
        blocks.sort_by_key(|b| b.token.to_ascii_uppercase());
    }

    let maps = blocks
        .iter()
        .enumerate()
        .map(|(i, block)| resolve(i as u32 + 1, block, blocks.get(i + 1).map(|b| b.token)))
        .collect::<Vec<_>>();
    log::info!("read {} maps from mapinfo", maps.len());
    MapTable::new(maps)
}

fn scan_blocks(text: &str) -> Vec<MapBlock<'_>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let line_end = text[pos..].find('\n').map_or(text.len(), |i| pos + i);
        let Some((token, consumed)) = map_header(&text[pos..line_end]) else {
            pos = line_end + 1;
            continue;
        };

        let header_end = pos + consumed;
        let Some(open) = text[header_end..].find('{').map(|i| header_end + i) else {
            log::warn!("mapinfo: MAP {token} has no property block");
            break;
        };
        let close = match text[open..].find('}') {
            Some(i) => open + i,
            None => {
                log::warn!("mapinfo: MAP {token} block is not closed");
                text.len()
            }
        };

        blocks.push(MapBlock {
            token,
            props: parse_props(&text[open + 1..close]),
        });
        pos = close + 1;
    }
    blocks
}

/// Match `MAP <token>` at the start of a line. Returns the token and the
/// number of bytes of `line` up to the end of the token.
fn map_header(line: &str) -> Option<(&str, usize)> {
    let trimmed = line.trim_start();
    if !trimmed.get(..3)?.eq_ignore_ascii_case("map") {
        return None;
    }
    let rest = &trimmed[3..];
    let token_start = rest.trim_start();
    if token_start.len() == rest.len() {
        return None;
    }
    let len = token_start
        .find(|c: char| !is_word(c))
        .unwrap_or(token_start.len());
    if len == 0 || len > MAX_TOKEN_LEN {
        return None;
    }
    Some((&token_start[..len], line.len() - token_start.len() + len))
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `key = value` lines; keys are lower-cased, later keys override earlier
/// ones.
fn parse_props(body: &str) -> HashMap<String, String> {
    body.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() || !key.chars().all(is_word) {
                return None;
            }
            Some((key.to_ascii_lowercase(), unquote(value.trim()).to_string()))
        })
        .filter(|(key, _)| KEYS.contains(&key.as_str()))
        .collect()
}

/// Strip one pair of quotes, only when they wrap the whole value.
fn unquote(value: &str) -> &str {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner,
        None => value,
    }
}

/// `endpic, "NAME"` form of `next`.
fn end_picture(next: &str) -> Option<&str> {
    let head = next.get(..6)?;
    if !head.eq_ignore_ascii_case("endpic") {
        return None;
    }
    let name = next[6..].trim_start().strip_prefix(',')?.trim();
    let name = name.strip_prefix('"')?.strip_suffix('"')?;
    (!name.is_empty() && name.len() <= MAX_TOKEN_LEN && name.chars().all(is_word)).then_some(name)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn resolve(ordinal: u32, block: &MapBlock<'_>, following: Option<&str>) -> MapInfo {
    let prop = |key: &str| block.props.get(key).map(String::as_str).filter(|v| !v.is_empty());

    let mut info = MapInfo {
        ordinal,
        map: block.token.to_string(),
        levelpic: prop("titlepatch").map(str::to_string),
        ..Default::default()
    };

    match prop("enterpic") {
        Some(pic) if pic.starts_with('$') => info.enteranim = Some(pic[1..].to_string()),
        Some(pic) => info.enterpic = Some(pic.to_string()),
        None => {}
    }
    match prop("exitpic") {
        Some(pic) if pic.starts_with('$') => info.exitanim = Some(pic[1..].to_string()),
        Some(pic) => info.exitpic = Some(pic.to_string()),
        None => {}
    }

    let next = prop("next");
    if let Some(endpic) = next.and_then(end_picture) {
        info.endpic = Some(endpic.to_string());
    } else if !next.is_some_and(|n| starts_with_ignore_case(n, "EndGame")) {
        // A next map equal to the following one in the table is implicit.
        info.next = next
            .filter(|n| following.is_none_or(|f| !f.eq_ignore_ascii_case(n)))
            .map(str::to_string);
        info.secretnext = prop("secretnext")
            .filter(|s| next != Some(*s))
            .map(str::to_string);
    }

    info.music = prop("music").map(str::to_string);
    info
}
