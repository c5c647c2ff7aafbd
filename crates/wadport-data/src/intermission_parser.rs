//! Parser for GZDoom intermission scripts.
//!
//! The language is line-oriented. Single-line directives (`BACKGROUND`,
//! `SPLAT`, `POINTER`, `PIC`) are parsed with winnow; `SPOTS` and
//! `ANIMATION` are followed by a `{ ... }` block with one item per line.
//! Lines that match no directive, including the `IFNOT*` guards which
//! have no interlevel equivalent, are ignored, as are `//` comments. A
//! malformed block item is skipped with a warning.

use winnow::ascii::{dec_int, space1};
use winnow::combinator::{alt, opt, preceded, separated_pair, terminated};
use winnow::prelude::*;
use winnow::token::take_while;

use wadport_types::{Guard, IntermissionScript, ScriptAnimation, Spot};

/// Placeholder image for `BLANK` animation frames.
pub const EMPTY_PATCH: &str = "TNT1A0";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive<'s> {
    Background(&'s str),
    Splat(&'s str),
    Pointer(&'s str, &'s str),
    Spots,
    Pic {
        guard: Guard,
        x: i32,
        y: i32,
        patch: &'s str,
    },
    Animation {
        guard: Guard,
        x: i32,
        y: i32,
        speed: u32,
        once: bool,
    },
}

/// Parse the script stored in lump `name`.
pub fn parse_intermission(name: &str, text: &str) -> IntermissionScript {
    let text = text.to_ascii_uppercase();
    let lines: Vec<&str> = text.lines().map(|line| strip_comment(line).trim()).collect();
    let mut script = IntermissionScript {
        name: name.to_string(),
        ..Default::default()
    };

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        i += 1;
        let Ok(parsed) = directive.parse(line) else {
            if !line.is_empty() {
                log::trace!("{name}: ignoring line {i}: {line}");
            }
            continue;
        };

        match parsed {
            Directive::Background(lump) => script.background = Some(lump.to_string()),
            Directive::Splat(lump) => script.splat = Some(lump.to_string()),
            Directive::Pointer(left, right) => {
                script.pointers = Some((left.to_string(), right.to_string()));
            }
            Directive::Spots => {
                for (line, item) in block(name, &lines, &mut i) {
                    let Ok((map, x, y)) = spot_line.parse(item) else {
                        log::warn!("{name}: line {line}: expected '<map> <x> <y>', got: {item}");
                        continue;
                    };
                    let spot = Spot { x, y };
                    match script.spots.iter_mut().find(|(m, _)| m.as_str() == map) {
                        Some(existing) => existing.1 = spot,
                        None => script.spots.push((map.to_string(), spot)),
                    }
                }
            }
            Directive::Pic { guard, x, y, patch } => script.animations.push(ScriptAnimation {
                x,
                y,
                guard,
                once: false,
                speed_tics: None,
                patches: vec![patch.to_string()],
            }),
            Directive::Animation {
                guard,
                x,
                y,
                speed,
                once,
            } => {
                let mut patches = Vec::new();
                for (line, item) in block(name, &lines, &mut i) {
                    let Ok(patch) = lump_name.parse(item) else {
                        log::warn!("{name}: line {line}: expected a patch name, got: {item}");
                        continue;
                    };
                    let patch = if patch == "BLANK" { EMPTY_PATCH } else { patch };
                    patches.push(patch.to_string());
                }
                if patches.is_empty() {
                    log::warn!("{name}: animation at ({x}, {y}) has no frames");
                    continue;
                }
                script.animations.push(ScriptAnimation {
                    x,
                    y,
                    guard,
                    once,
                    speed_tics: Some(speed),
                    patches,
                });
            }
        }
    }

    log::debug!(
        "{name}: {} spots, {} animations",
        script.spots.len(),
        script.animations.len()
    );
    script
}

fn strip_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(code, _)| code)
}

/// Non-empty lines of the `{ ... }` block starting at `lines[*i]`, with
/// their 1-based line numbers. Leaves `*i` after the closing brace; a
/// block left open runs to the end of the script.
fn block<'l>(name: &str, lines: &[&'l str], i: &mut usize) -> Vec<(usize, &'l str)> {
    let mut items = Vec::new();
    if lines.get(*i) != Some(&"{") {
        log::warn!("{name}: line {}: expected '{{'", *i + 1);
        return items;
    }
    *i += 1;
    while let Some(&line) = lines.get(*i) {
        *i += 1;
        if line == "}" {
            return items;
        }
        if !line.is_empty() {
            items.push((*i, line));
        }
    }
    log::warn!("{name}: block not closed before end of script");
    items
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn lump_name<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1..=8, is_name_char).parse_next(input)
}

fn coord(input: &mut &str) -> ModalResult<i32> {
    take_while(1..=3, |c: char| c.is_ascii_digit())
        .try_map(|digits: &str| digits.parse::<i32>())
        .parse_next(input)
}

fn speed(input: &mut &str) -> ModalResult<u32> {
    take_while(1..=2, |c: char| c.is_ascii_digit())
        .try_map(|digits: &str| digits.parse::<u32>())
        .parse_next(input)
}

fn spot_line<'s>(input: &mut &'s str) -> ModalResult<(&'s str, i32, i32)> {
    (
        lump_name,
        preceded(space1, dec_int),
        preceded(space1, dec_int),
    )
        .parse_next(input)
}

fn guard_prefix(input: &mut &str) -> ModalResult<Guard> {
    alt((
        preceded(("IFENTERING", space1), lump_name).map(|m| Guard::Entering(m.to_string())),
        preceded(("IFLEAVING", space1), lump_name).map(|m| Guard::Leaving(m.to_string())),
        preceded(("IFVISITED", space1), lump_name).map(|m| Guard::Visited(m.to_string())),
        // The origin map is unknown on the tally screen.
        preceded(
            ("IFTRAVELLING", space1),
            separated_pair(lump_name, space1, lump_name),
        )
        .map(|(_from, to)| Guard::Entering(to.to_string())),
    ))
    .parse_next(input)
}

fn drawable<'s>(input: &mut &'s str) -> ModalResult<Directive<'s>> {
    let guard = opt(terminated(guard_prefix, space1))
        .parse_next(input)?
        .unwrap_or_default();

    alt((
        preceded(
            ("PIC", space1),
            (coord, preceded(space1, coord), preceded(space1, lump_name)),
        )
        .map(|(x, y, patch)| Directive::Pic {
            guard: guard.clone(),
            x,
            y,
            patch,
        }),
        preceded(
            ("ANIMATION", space1),
            (
                coord,
                preceded(space1, coord),
                preceded(space1, speed),
                opt(preceded(space1, "ONCE")),
            ),
        )
        .map(|(x, y, speed, once)| Directive::Animation {
            guard: guard.clone(),
            x,
            y,
            speed,
            once: once.is_some(),
        }),
    ))
    .parse_next(input)
}

fn directive<'s>(input: &mut &'s str) -> ModalResult<Directive<'s>> {
    alt((
        preceded(("BACKGROUND", space1), lump_name).map(Directive::Background),
        preceded(("SPLAT", space1), lump_name).map(Directive::Splat),
        preceded(
            ("POINTER", space1),
            separated_pair(lump_name, space1, lump_name),
        )
        .map(|(left, right)| Directive::Pointer(left, right)),
        "SPOTS".map(|_| Directive::Spots),
        drawable,
    ))
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERA: &str = "\
Background WIMAP0
Splat WISPLAT
Pointer WIURH0 WIURH1

Spots
{
    MAP01 185 164
    MAP02 148 143
}

IfLeaving MAP01 Animation 224 104 11
{
    WIA00000
    WIA00001
    Blank
}

IfVisited MAP02 Pic 10 20 PatchA
IfTravelling MAP01 MAP02 Animation 1 2 3 Once
{
    WIA10000
}
IfNotVisited MAP03 Pic 1 1 HIDDEN
Pic 5 6 NOGUARD
";

    fn parse(text: &str) -> IntermissionScript {
        parse_intermission("INTERA", text)
    }

    #[test]
    fn header_directives() {
        let script = parse(INTERA);
        assert_eq!(script.name, "INTERA");
        assert_eq!(script.background.as_deref(), Some("WIMAP0"));
        assert_eq!(script.splat.as_deref(), Some("WISPLAT"));
        assert_eq!(
            script.pointers,
            Some(("WIURH0".to_string(), "WIURH1".to_string()))
        );
    }

    #[test]
    fn spots_in_order() {
        let script = parse(INTERA);
        assert_eq!(
            script.spots,
            vec![
                ("MAP01".to_string(), Spot { x: 185, y: 164 }),
                ("MAP02".to_string(), Spot { x: 148, y: 143 }),
            ]
        );
    }

    #[test]
    fn guarded_animation_block() {
        let script = parse(INTERA);
        let anim = &script.animations[0];
        assert_eq!(anim.guard, Guard::Leaving("MAP01".into()));
        assert_eq!((anim.x, anim.y), (224, 104));
        assert_eq!(anim.speed_tics, Some(11));
        assert!(!anim.once);
        assert_eq!(anim.patches, vec!["WIA00000", "WIA00001", EMPTY_PATCH]);
    }

    #[test]
    fn pic_and_travelling() {
        let script = parse(INTERA);
        assert_eq!(script.animations.len(), 4);

        let pic = &script.animations[1];
        assert_eq!(pic.guard, Guard::Visited("MAP02".into()));
        assert_eq!(pic.speed_tics, None);
        assert_eq!(pic.patches, vec!["PATCHA"]);

        let travelling = &script.animations[2];
        assert_eq!(travelling.guard, Guard::Entering("MAP02".into()));
        assert!(travelling.once);
        assert_eq!(travelling.speed_tics, Some(3));

        let unguarded = &script.animations[3];
        assert_eq!(unguarded.guard, Guard::None);
        assert_eq!(unguarded.patches, vec!["NOGUARD"]);
    }

    #[test]
    fn out_of_range_operands_are_ignored() {
        let script = parse("PIC 1000 1 X\nANIMATION 1 1 100\n{\nX\n}\nBACKGROUND TOOLONGNAME\n");
        assert!(script.animations.is_empty());
        assert_eq!(script.background, None);
    }

    #[test]
    fn background_only() {
        let script = parse("BACKGROUND INTERPIC\r\n");
        assert_eq!(script.background.as_deref(), Some("INTERPIC"));
        assert!(script.is_empty());
    }

    #[test]
    fn truncated_block_ends_at_eof() {
        let script = parse("ANIMATION 1 2 3\n{\nWIA0\nWIA1");
        assert_eq!(script.animations[0].patches, vec!["WIA0", "WIA1"]);

        let script = parse("SPOTS\n{\nMAP01 1 2");
        assert_eq!(script.spots.len(), 1);
    }

    #[test]
    fn duplicate_spot_keeps_position() {
        let script = parse("SPOTS\n{\nMAP01 1 2\nMAP02 3 4\nMAP01 5 6\n}");
        assert_eq!(script.spots[0], ("MAP01".to_string(), Spot { x: 5, y: 6 }));
        assert_eq!(script.spots.len(), 2);
    }

    #[test]
    fn bad_spot_line_is_skipped() {
        let script = parse("SPOTS\n{\nMAP01 one two\nMAP02 3 4\n}\nBACKGROUND WIMAP0");
        assert_eq!(script.spots, vec![("MAP02".to_string(), Spot { x: 3, y: 4 })]);
        assert_eq!(script.background.as_deref(), Some("WIMAP0"));
    }

    #[test]
    fn bad_frame_line_is_skipped() {
        let script = parse("ANIMATION 1 2 3\n{\nWIA00000\nNOT A PATCH\nWIA00001\n}");
        assert_eq!(script.animations[0].patches, vec!["WIA00000", "WIA00001"]);
    }

    #[test]
    fn trailing_comments_are_stripped() {
        let script = parse("ANIMATION 1 2 3 // water\n{\nWIA00000 // first\n// whole line\nBLANK\n}");
        assert_eq!(script.animations.len(), 1);
        assert_eq!(script.animations[0].patches, vec!["WIA00000", EMPTY_PATCH]);
    }

    #[test]
    fn empty_script() {
        let script = parse("");
        assert_eq!(script, IntermissionScript { name: "INTERA".into(), ..Default::default() });
    }
}
