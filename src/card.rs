//! SVG rendering of the stats card.
//!
//! The card is laid out on a 550x280 canvas and emitted at twice that size through the
//! `viewBox`, so it stays sharp on high density screens. Output depends only on the inputs.

use crate::error::CardError;
use crate::rank::RankResult;
use crate::types::TopLanguage;
use std::fmt::Write;

pub const WIDTH: u32 = 1100;
pub const HEIGHT: u32 = 560;
const CANVAS_WIDTH: f32 = 550.0;
const CANVAS_HEIGHT: f32 = 280.0;

const PADDING: f32 = 20.0;
const COLUMN_GAP: f32 = 20.0;
const CONTENT_TOP: f32 = 78.0;
const CONTENT_BOTTOM: f32 = CANVAS_HEIGHT - PADDING;
// Stats column takes 1 share, languages 1.5.
const LEFT_COLUMN_WIDTH: f32 = (CANVAS_WIDTH - 2.0 * PADDING - COLUMN_GAP) / 2.5;
const RIGHT_COLUMN_X: f32 = PADDING + LEFT_COLUMN_WIDTH + COLUMN_GAP;
const RIGHT_COLUMN_END: f32 = CANVAS_WIDTH - PADDING;

const STAT_BOX_GAP: f32 = 10.0;
const STAT_BOX_PADDING: f32 = 12.0;

const BADGE_WIDTH: f32 = 96.0;
const BADGE_HEIGHT: f32 = 34.0;
const BADGE_Y: f32 = 24.0;

const LANG_LIST_TOP: f32 = 100.0;
const LANG_ROW_HEIGHT: f32 = 28.0;
const ICON_SIZE: f32 = 20.0;
const ICON_GAP: f32 = 10.0;
const BAR_HEIGHT: f32 = 4.0;

const BACKGROUND: &str = "#030712";
const BORDER: &str = "#333";
const MUTED: &str = "#8899a6";
const LANG_NAME: &str = "#e5e7eb";
const BAR_TRACK: &str = "#1f2937";

/// Everything drawn on the card.
#[derive(Clone, Debug)]
pub struct CardData<'a> {
    pub display_name: &'a str,
    pub subtitle: &'a str,
    pub rank: RankResult,
    pub commits: u64,
    pub pull_requests: u64,
    pub languages: &'a [TopLanguage],
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn write_defs(out: &mut String, rank: &RankResult) -> std::fmt::Result {
    write!(
        out,
        r##"<defs>
<radialGradient id="rank-glow" cx="50%" cy="50%" r="50%">
  <stop offset="0%" stop-color="{color}" stop-opacity="0.13"/>
  <stop offset="70%" stop-color="{color}" stop-opacity="0"/>
</radialGradient>
<filter id="badge-shadow" x="-50%" y="-50%" width="200%" height="200%">
  <feDropShadow dx="0" dy="0" stdDeviation="7.5" flood-color="{shadow}" flood-opacity="0.27"/>
</filter>
<filter id="text-glow" x="-50%" y="-50%" width="200%" height="200%">
  <feDropShadow dx="0" dy="0" stdDeviation="5" flood-color="{shadow}" flood-opacity="1"/>
</filter>
<filter id="bar-glow" x="-20%" y="-300%" width="140%" height="700%">
  <feGaussianBlur stdDeviation="4" result="blur"/>
  <feMerge><feMergeNode in="blur"/><feMergeNode in="SourceGraphic"/></feMerge>
</filter>
<clipPath id="card-clip">
  <rect width="{w}" height="{h}" rx="16"/>
</clipPath>
</defs>
"##,
        color = rank.color,
        shadow = rank.shadow_color,
        w = CANVAS_WIDTH,
        h = CANVAS_HEIGHT,
    )
}

fn write_header(out: &mut String, card: &CardData<'_>) -> std::fmt::Result {
    writeln!(
        out,
        r##"<text x="{PADDING}" y="44" fill="#fff" font-size="22" font-weight="800" letter-spacing="1">{}</text>"##,
        escape_xml(card.display_name)
    )?;
    writeln!(
        out,
        r#"<text x="{PADDING}" y="60" fill="{MUTED}" font-size="10" font-weight="600" letter-spacing="2">{}</text>"#,
        escape_xml(card.subtitle)
    )?;

    let x = CANVAS_WIDTH - PADDING - BADGE_WIDTH;
    let text_y = BADGE_Y + BADGE_HEIGHT / 2.0;
    let color = card.rank.color;
    writeln!(
        out,
        r#"<rect x="{x}" y="{BADGE_Y}" width="{BADGE_WIDTH}" height="{BADGE_HEIGHT}" rx="8" fill="rgba(0,0,0,0.5)" stroke="{color}" stroke-width="2" filter="url(#badge-shadow)"/>"#
    )?;
    writeln!(
        out,
        r#"<text x="{}" y="{text_y}" dominant-baseline="central" fill="{color}" font-size="12" font-weight="700">RANK</text>"#,
        x + 14.0
    )?;
    writeln!(
        out,
        r#"<text x="{}" y="{text_y}" dominant-baseline="central" fill="{color}" font-size="24" font-weight="900" filter="url(#text-glow)">{}</text>"#,
        x + 52.0,
        escape_xml(card.rank.label)
    )
}

fn write_stat_box(out: &mut String, y: f32, height: f32, label: &str, value: u64) -> std::fmt::Result {
    let text_x = PADDING + STAT_BOX_PADDING;
    let middle = y + height / 2.0;
    writeln!(
        out,
        r#"<rect x="{PADDING}" y="{y}" width="{LEFT_COLUMN_WIDTH}" height="{height}" rx="8" fill="rgba(255,255,255,0.03)" stroke="rgba(255,255,255,0.08)"/>"#
    )?;
    writeln!(
        out,
        r#"<text x="{text_x}" y="{}" fill="{MUTED}" font-size="9" font-weight="700" letter-spacing="1">{}</text>"#,
        middle - 6.0,
        escape_xml(label)
    )?;
    writeln!(
        out,
        r##"<text x="{text_x}" y="{}" fill="#fff" font-size="24" font-weight="800" letter-spacing="-1">{value}</text>"##,
        middle + 20.0
    )
}

fn write_stats_column(out: &mut String, card: &CardData<'_>) -> std::fmt::Result {
    let box_height = (CONTENT_BOTTOM - CONTENT_TOP - STAT_BOX_GAP) / 2.0;
    write_stat_box(out, CONTENT_TOP, box_height, "COMMITS (1 YEAR)", card.commits)?;
    write_stat_box(
        out,
        CONTENT_TOP + box_height + STAT_BOX_GAP,
        box_height,
        "PULL REQUESTS",
        card.pull_requests,
    )
}

fn write_language_row(out: &mut String, y: f32, lang: &TopLanguage) -> std::fmt::Result {
    let text_x = RIGHT_COLUMN_X + ICON_SIZE + ICON_GAP;
    let track_width = RIGHT_COLUMN_END - text_x;
    let fill_width = track_width * f32::from(lang.percent.min(100)) / 100.0;
    let bar_y = y + 14.0;
    let name = escape_xml(&lang.name);
    let color = escape_xml(&lang.color);

    writeln!(
        out,
        r#"<image href="{}" x="{RIGHT_COLUMN_X}" y="{y}" width="{ICON_SIZE}" height="{ICON_SIZE}" opacity="0.9"><title>{name}</title></image>"#,
        escape_xml(&lang.icon_url)
    )?;
    writeln!(
        out,
        r#"<text x="{text_x}" y="{}" fill="{LANG_NAME}" font-size="10" font-weight="600">{name}</text>"#,
        y + 10.0
    )?;
    writeln!(
        out,
        r#"<text x="{RIGHT_COLUMN_END}" y="{}" fill="{MUTED}" font-size="10" text-anchor="end">{}%</text>"#,
        y + 10.0,
        lang.percent
    )?;
    writeln!(
        out,
        r#"<rect x="{text_x}" y="{bar_y}" width="{track_width}" height="{BAR_HEIGHT}" rx="2" fill="{BAR_TRACK}"/>"#
    )?;
    writeln!(
        out,
        r#"<rect x="{text_x}" y="{bar_y}" width="{fill_width}" height="{BAR_HEIGHT}" rx="2" fill="{color}" filter="url(#bar-glow)"/>"#
    )
}

fn write_languages_column(out: &mut String, languages: &[TopLanguage]) -> std::fmt::Result {
    writeln!(
        out,
        r#"<text x="{RIGHT_COLUMN_X}" y="{}" fill="{MUTED}" font-size="9" font-weight="700" letter-spacing="1">SYSTEM TECHNOLOGIES</text>"#,
        CONTENT_TOP + 8.0
    )?;

    if languages.is_empty() {
        return writeln!(
            out,
            r#"<text x="{RIGHT_COLUMN_X}" y="{}" fill="{LANG_NAME}" font-size="10">NO LANGUAGE DATA</text>"#,
            LANG_LIST_TOP + 10.0
        );
    }

    for (i, lang) in languages.iter().enumerate() {
        write_language_row(out, LANG_LIST_TOP + i as f32 * LANG_ROW_HEIGHT, lang)?;
    }
    Ok(())
}

fn write_card(out: &mut String, card: &CardData<'_>) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}" font-family="sans-serif">"#
    )?;
    write_defs(out, &card.rank)?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="{BACKGROUND}"/>"#)?;
    writeln!(out, r#"<g clip-path="url(#card-clip)">"#)?;
    writeln!(
        out,
        r#"<circle cx="{}" cy="150" r="150" fill="url(#rank-glow)" opacity="0.5"/>"#,
        CANVAS_WIDTH - 150.0
    )?;
    write_header(out, card)?;
    write_stats_column(out, card)?;
    write_languages_column(out, card.languages)?;
    writeln!(out, "</g>")?;
    writeln!(
        out,
        r#"<rect x="0.5" y="0.5" width="{}" height="{}" rx="16" fill="none" stroke="{BORDER}"/>"#,
        CANVAS_WIDTH - 1.0,
        CANVAS_HEIGHT - 1.0
    )?;
    writeln!(out, "</svg>")
}

/// Renders the card as a standalone SVG document.
///
/// Language icons are linked, not embedded: viewers that block external resources in SVG
/// images (an `<img>` tag in a browser, a README badge) show the card without them.
pub fn render_card(card: &CardData<'_>) -> Result<String, CardError> {
    let mut out = String::from("<?xml version='1.0' encoding='UTF-8'?>\n");
    write_card(&mut out, card)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::icon_url;
    use crate::rank::calculate_rank;

    fn lang(name: &str, color: &str, percent: u8) -> TopLanguage {
        TopLanguage {
            name: name.to_string(),
            color: color.to_string(),
            percent,
            size: u64::from(percent) * 10,
            icon_url: icon_url(name),
        }
    }

    fn render(languages: &[TopLanguage]) -> String {
        render_card(&CardData {
            display_name: "OCTOCAT",
            subtitle: "FULL STACK DEVELOPER",
            rank: calculate_rank(1200, 10),
            commits: 1200,
            pull_requests: 10,
            languages,
        })
        .expect("render should succeed")
    }

    #[test]
    fn test_fixed_dimensions() {
        let svg = render(&[]);
        assert!(svg.contains(r#"width="1100" height="560" viewBox="0 0 550 280""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_header_and_stats() {
        let svg = render(&[]);
        assert!(svg.contains(">OCTOCAT</text>"));
        assert!(svg.contains(">FULL STACK DEVELOPER</text>"));
        assert!(svg.contains(">RANK</text>"));
        // 1200 + 5 * 10 = 1250 -> S
        assert!(svg.contains(r##"fill="#00f0ff" font-size="24" font-weight="900""##));
        assert!(svg.contains(">S</text>"));
        assert!(svg.contains(">1200</text>"));
        assert!(svg.contains(">10</text>"));
        assert!(svg.contains("COMMITS (1 YEAR)"));
        assert!(svg.contains("PULL REQUESTS"));
    }

    #[test]
    fn test_language_rows() {
        let languages = vec![lang("Rust", "#dea584", 60), lang("C++", "#f34b7d", 40)];
        let svg = render(&languages);

        assert!(svg.contains(">Rust</text>"));
        assert!(svg.contains(">60%</text>"));
        assert!(svg.contains(">40%</text>"));
        assert!(svg.contains("icons/cplusplus/cplusplus-original.svg"));
        assert!(svg.contains(r##"fill="#dea584" filter="url(#bar-glow)""##));
        assert_eq!(svg.matches("<image ").count(), 2);
        assert!(!svg.contains("NO LANGUAGE DATA"));
    }

    #[test]
    fn test_bar_width_follows_percent() {
        let svg = render(&[lang("Go", "#00ADD8", 50)]);
        let track = RIGHT_COLUMN_END - (RIGHT_COLUMN_X + ICON_SIZE + ICON_GAP);
        assert!(svg.contains(&format!(r##"width="{}" height="4" rx="2" fill="#00ADD8""##, track / 2.0)));
    }

    #[test]
    fn test_empty_languages_placeholder() {
        let svg = render(&[]);
        assert!(svg.contains("NO LANGUAGE DATA"));
        assert!(!svg.contains("<image "));
    }

    #[test]
    fn test_text_is_escaped() {
        let svg = render_card(&CardData {
            display_name: "A & B <DEV>",
            subtitle: "\"QUOTED\"",
            rank: calculate_rank(0, 0),
            commits: 0,
            pull_requests: 0,
            languages: &[lang("F#", "#b845fc", 100)],
        })
        .unwrap();

        assert!(svg.contains("A &amp; B &lt;DEV&gt;"));
        assert!(svg.contains("&quot;QUOTED&quot;"));
        assert!(!svg.contains("<DEV>"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let languages = vec![lang("Python", "#3572A5", 100)];
        assert_eq!(render(&languages), render(&languages));
    }
}
