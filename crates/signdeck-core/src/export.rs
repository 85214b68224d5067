//! Scene export to the signage playback XML format.
//!
//! The output is a single page document with one `Section` per element,
//! in kind order then insertion order.

use std::fmt::Write;

use crate::config::EditorConfig;
use crate::elements::{
    Clock, Element, ElementBody, HorizontalAlign, Media, QrCode, ScrollMode, ShapeElement, ShapeOutline, Text,
    Weather, WebPage, YouTube,
};
use crate::scene::Scene;

/// Seconds between web page reloads on the player.
pub const WEB_PAGE_REFRESH_SECS: u32 = 300;
/// Marquee speed in pixels per second for scrolling text.
pub const TEXT_SCROLL_SPEED: u32 = 60;
/// Format version written on the root node.
pub const FORMAT_VERSION: u32 = 1;

/// Serialize the whole scene into one XML document.
pub fn export_scene(scene: &Scene, config: &EditorConfig) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version='1.0'?>\n");
    let _ = writeln!(xml, "<Signage version=\"{FORMAT_VERSION}\">");
    xml.push_str("  <Pages count=\"1\">\n");
    let _ = writeln!(
        xml,
        "    <Page index=\"0\" width=\"{}\" height=\"{}\">",
        num(config.page_width),
        num(config.page_height)
    );
    let _ = writeln!(
        xml,
        "      <Background type=\"color\" color=\"{}\"/>",
        escape_xml(&config.background)
    );

    for (index, element) in scene.iter().enumerate() {
        write_section(&mut xml, index, element);
    }

    xml.push_str("    </Page>\n");
    xml.push_str("  </Pages>\n");
    xml.push_str("  <Timeline loop=\"true\">\n");
    xml.push_str("    <Item page=\"0\" duration=\"0\"/>\n");
    xml.push_str("  </Timeline>\n");
    xml.push_str("</Signage>\n");

    log::info!("export: {} sections", scene.len());
    xml
}

/// Live-update id derived from the document-wide section index.
pub fn live_update_id(index: usize) -> String {
    format!("live-{index:04}")
}

fn write_section(xml: &mut String, index: usize, element: &Element) {
    let bounds = element.bounds();
    let _ = writeln!(
        xml,
        "      <Section index=\"{index}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\">",
        num(bounds.x0),
        num(bounds.y0),
        num(bounds.width()),
        num(bounds.height())
    );
    let live = live_update_id(index);
    match &element.body {
        ElementBody::Text(text) => write_text(xml, &live, text),
        ElementBody::WebPage(page) => write_web_page(xml, &live, page),
        ElementBody::YouTube(video) => write_youtube(xml, &live, video),
        ElementBody::QrCode(qr) => write_qr_code(xml, &live, qr),
        ElementBody::Weather(weather) => write_weather(xml, &live, weather),
        ElementBody::Clock(clock) => write_clock(xml, &live, clock),
        ElementBody::Shape(shape) => write_shape(xml, &live, shape),
        ElementBody::Media(media) => write_media(xml, &live, media),
    }
    xml.push_str("      </Section>\n");
}

fn align_keyword(align: HorizontalAlign) -> &'static str {
    match align {
        HorizontalAlign::Left => "near",
        HorizontalAlign::Center => "center",
        HorizontalAlign::Right => "far",
    }
}

fn write_text(xml: &mut String, live: &str, text: &Text) {
    let _ = write!(
        xml,
        "        <Content type=\"text\" liveUpdateId=\"{live}\" text=\"{}\" fontFamily=\"{}\" fontSize=\"{}\" \
         fontStyle=\"{}\" textDecoration=\"{}\" align=\"{}\" color=\"{}\" background=\"{}\"",
        escape_xml(&text.text),
        escape_xml(&text.font_family),
        num(text.font_size),
        text.font_style.keyword(),
        text.text_decoration.keyword(),
        align_keyword(text.align),
        escape_xml(&text.fill),
        escape_xml(&text.background),
    );
    if text.scroll != ScrollMode::None {
        let _ = write!(
            xml,
            " scroll=\"{}\" scrollSpeed=\"{TEXT_SCROLL_SPEED}\"",
            text.scroll.keyword()
        );
    }
    xml.push_str("/>\n");
}

fn write_web_page(xml: &mut String, live: &str, page: &WebPage) {
    let _ = writeln!(
        xml,
        "        <Content type=\"webpage\" liveUpdateId=\"{live}\" url=\"{}\" refreshInterval=\"{WEB_PAGE_REFRESH_SECS}\"/>",
        escape_xml(&page.url)
    );
}

fn write_youtube(xml: &mut String, live: &str, video: &YouTube) {
    let _ = writeln!(
        xml,
        "        <Content type=\"youtube\" liveUpdateId=\"{live}\" source=\"{}\"/>",
        escape_xml(&video.source)
    );
}

fn write_qr_code(xml: &mut String, live: &str, qr: &QrCode) {
    let _ = writeln!(
        xml,
        "        <Content type=\"qrcode\" liveUpdateId=\"{live}\" text=\"{}\" size=\"{}\"/>",
        escape_xml(&qr.text),
        num(qr.size)
    );
}

fn write_weather(xml: &mut String, live: &str, weather: &Weather) {
    let _ = writeln!(
        xml,
        "        <Content type=\"weather\" liveUpdateId=\"{live}\" city=\"{}\" country=\"{}\" theme=\"{}\"/>",
        escape_xml(&weather.city),
        escape_xml(&weather.country),
        weather.theme.name()
    );
}

fn write_clock(xml: &mut String, live: &str, clock: &Clock) {
    let _ = writeln!(
        xml,
        "        <Content type=\"clock\" liveUpdateId=\"{live}\" timeFormat=\"{}\" dateFormat=\"{}\" theme=\"{}\"/>",
        escape_xml(&clock.time_format),
        escape_xml(&clock.date_format),
        clock.theme.name()
    );
}

fn write_shape(xml: &mut String, live: &str, shape: &ShapeElement) {
    let _ = writeln!(
        xml,
        "        <Content type=\"shape\" liveUpdateId=\"{live}\" fill=\"{}\">",
        escape_xml(&shape.fill)
    );
    let (w, h) = (num(shape.width), num(shape.height));
    match shape.outline() {
        ShapeOutline::Rect => {
            let _ = writeln!(xml, "          <Rect width=\"{w}\" height=\"{h}\"/>");
        }
        ShapeOutline::RoundedRect { radius } => {
            let _ = writeln!(
                xml,
                "          <Rect width=\"{w}\" height=\"{h}\" radius=\"{}\"/>",
                num(radius)
            );
        }
        ShapeOutline::Ellipse => {
            let _ = writeln!(xml, "          <Ellipse width=\"{w}\" height=\"{h}\"/>");
        }
        ShapeOutline::Polygon(points) => {
            let points: Vec<String> = points
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect();
            let _ = writeln!(xml, "          <Polygon points=\"{}\"/>", points.join(" "));
        }
    }
    xml.push_str("        </Content>\n");
}

fn write_media(xml: &mut String, live: &str, media: &Media) {
    let _ = writeln!(
        xml,
        "        <Content type=\"{}\" liveUpdateId=\"{live}\">",
        media.kind.name()
    );
    let source = media.source.as_deref().unwrap_or(media.name.as_str());
    let _ = writeln!(
        xml,
        "          <File name=\"{}\" source=\"{}\"/>",
        escape_xml(&media.name),
        escape_xml(source)
    );
    xml.push_str("        </Content>\n");
}

/// Number with at most two decimals and no trailing zeros.
fn num(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Escape a string for use inside a double-quoted attribute.
///
/// Line breaks and tabs become character references so they survive
/// attribute normalization. Other C0 controls are not allowed in XML 1.0
/// and are dropped.
fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c if c.is_ascii_control() && c != '\u{7f}' => {}
            c => out.push(c),
        }
    }
    out
}
