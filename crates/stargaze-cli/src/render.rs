//! Text-card rendering of gallery slots.

use stargaze_apod::gallery::GallerySlot;
use stargaze_core::{MediaType, Source};

const PLACEHOLDER_TITLE: &str = "(no picture published)";

/// Renders slots as text cards, one per slot, preceded by a notice when the
/// records came from the fallback dataset.
#[must_use]
pub fn render_slots(slots: &[GallerySlot], source: Source) -> String {
    let mut out = String::new();
    if source == Source::Fallback {
        out.push_str("note: live API unavailable, showing archived fallback data\n\n");
    }
    for slot in slots {
        out.push_str(&render_card(slot));
    }
    out
}

fn render_card(slot: &GallerySlot) -> String {
    let Some(record) = &slot.record else {
        return format!("{}  {PLACEHOLDER_TITLE}\n", slot.date);
    };

    let title = record.title.as_deref().unwrap_or(PLACEHOLDER_TITLE);
    let tag = match record.media_type {
        MediaType::Image => "image",
        MediaType::Video => "video",
        MediaType::Other => "other",
    };
    let mut card = format!("{}  {title}  [{tag}]\n", slot.date);

    // Videos link their embeddable player; images their (HD if available)
    // source URL.
    let link = match record.media_type {
        MediaType::Video => record.embed_url.as_deref().or(record.url.as_deref()),
        MediaType::Image | MediaType::Other => {
            record.hd_url.as_deref().or(record.url.as_deref())
        }
    };
    if let Some(link) = link {
        card.push_str(&format!("            {link}\n"));
    }
    card
}
