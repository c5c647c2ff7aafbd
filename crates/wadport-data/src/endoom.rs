//! Text-mode exit screen: code page 437 mapping and ANSI rendering.

use std::fmt::Write;

use wadport_types::Endoom;

const CP437_LOW: &str = " ☺☻♥♦♣♠•◘○◙♂♀♪♫☼►◄↕‼¶§▬↨↑↓→←∟↔▲▼";
const CP437_HIGH: &str = concat!(
    "ÇüéâäàåçêëèïîìÄÅ",
    "ÉæÆôöòûùÿÖÜ¢£¥₧ƒ",
    "áíóúñÑªº¿⌐¬½¼¡«»",
    "░▒▓│┤╡╢╖╕╣║╗╝╜╛┐",
    "└┴┬├─┼╞╟╚╔╩╦╠═╬╧",
    "╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀",
    "αßΓπΣσµτΦΘΩδ∞φε∩",
    "≡±≥≤⌠⌡÷≈°∙·√ⁿ²■\u{A0}",
);

// VGA color index → SGR code.
const BG_COLORS: [&str; 8] = ["40", "44", "42", "46", "41", "45", "48;5;130", "47"];
const FG_COLORS: [&str; 16] = [
    "30", "34", "32", "36", "31", "35", "38;5;130", "37", "90", "94", "92", "96", "91", "95", "33",
    "97",
];

pub fn cp437_to_char(byte: u8) -> char {
    match byte {
        0x00..=0x1F => CP437_LOW.chars().nth(byte as usize).unwrap_or(' '),
        0x7F => '⌂',
        0x80..=0xFF => CP437_HIGH
            .chars()
            .nth(byte as usize - 0x80)
            .unwrap_or(' '),
        _ => byte as char,
    }
}

/// Render the screen with ANSI SGR escapes, one line per row, resetting
/// attributes at the end of each line.
pub fn render_ansi(endoom: &Endoom) -> String {
    let mut out = String::new();
    for row in &endoom.rows {
        for cell in row {
            let blink = if cell.blink { ";5" } else { "" };
            let _ = write!(
                out,
                "\x1b[{};{}{}m{}",
                BG_COLORS[cell.bg as usize & 7],
                FG_COLORS[cell.fg as usize & 15],
                blink,
                cell.ch
            );
        }
        out.push_str("\x1b[0m\n");
    }
    out
}

/// Plain text rendering without colors.
pub fn render_plain(endoom: &Endoom) -> String {
    endoom
        .rows
        .iter()
        .map(|row| {
            let line: String = row.iter().map(|c| c.ch).collect();
            format!("{}\n", line.trim_end())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wadport_types::EndoomCell;

    #[test]
    fn code_page_tables_are_complete() {
        assert_eq!(CP437_LOW.chars().count(), 32);
        assert_eq!(CP437_HIGH.chars().count(), 128);
    }

    #[test]
    fn maps_ascii_and_box_drawing() {
        assert_eq!(cp437_to_char(b'A'), 'A');
        assert_eq!(cp437_to_char(0), ' ');
        assert_eq!(cp437_to_char(0x01), '☺');
        assert_eq!(cp437_to_char(0xB0), '░');
        assert_eq!(cp437_to_char(0xC4), '─');
        assert_eq!(cp437_to_char(0xDB), '█');
        assert_eq!(cp437_to_char(0xE1), 'ß');
        assert_eq!(cp437_to_char(0xFE), '■');
    }

    fn screen() -> Endoom {
        Endoom {
            rows: vec![vec![
                EndoomCell::from_attribute(b'H', 'H', 0x4E),
                EndoomCell::from_attribute(b'i', 'i', 0x87),
            ]],
        }
    }

    #[test]
    fn ansi_uses_vga_color_tables() {
        let out = render_ansi(&screen());
        assert_eq!(out, "\x1b[41;33mH\x1b[40;37;5mi\x1b[0m\n");
    }

    #[test]
    fn plain_trims_trailing_blanks() {
        let mut endoom = screen();
        endoom.rows[0].push(EndoomCell::from_attribute(b' ', ' ', 0x07));
        assert_eq!(render_plain(&endoom), "Hi\n");
    }
}
