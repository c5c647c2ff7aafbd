//! UMAPINFO and CREDITS text output.

use std::fmt::Write;

use wadport_types::{MapInfo, MapTable};

/// Render the map table as UMAPINFO, one block per map in ordinal order.
pub fn render_umapinfo(maps: &MapTable) -> String {
    let mut ordered: Vec<&MapInfo> = maps.maps.iter().collect();
    ordered.sort_by_key(|m| m.ordinal);

    ordered
        .into_iter()
        .map(map_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn map_block(map: &MapInfo) -> String {
    let mut out = format!("MAP {}\n{{\n", map.map);
    let optional = [
        ("endpic", &map.endpic),
        ("next", &map.next),
        ("nextsecret", &map.secretnext),
        ("music", &map.music),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            let _ = writeln!(out, "  {key} = \"{value}\"");
        }
    }
    let always = [
        ("levelpic", &map.levelpic),
        ("enteranim", &map.enteranim),
        ("exitanim", &map.exitanim),
    ];
    for (key, value) in always {
        let _ = writeln!(out, "  {key} = \"{}\"", value.as_deref().unwrap_or_default());
    }
    out.push_str("}\n");
    out
}

pub fn render_credits(mod_author: &str) -> String {
    format!("{mod_author} - original GZDoom intermission screen mod, including all graphics and animations.")
}
