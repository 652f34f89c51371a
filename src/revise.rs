use crate::paragraph::{Classification, Paragraph};

/// Context-sensitive revision of paragraph classifications.
///
/// Expects `cf_class` to be set on every paragraph. Initializes `class`
/// from it, then runs four passes; afterwards every `class` is `Good` or
/// `Bad`.
pub(crate) fn revise_paragraph_classification(
    paragraphs: &mut [Paragraph],
    max_heading_distance: usize,
) {
    for paragraph in paragraphs.iter_mut() {
        paragraph.class = paragraph.cf_class;
    }

    // Pass 1: a short heading sitting within max_heading_distance
    // characters of good body text is promoted to neargood.
    for i in 0..paragraphs.len() {
        if !(paragraphs[i].heading && paragraphs[i].class == Classification::Short) {
            continue;
        }
        let mut distance = 0;
        for j in i + 1..paragraphs.len() {
            if distance > max_heading_distance {
                break;
            }
            if paragraphs[j].class == Classification::Good {
                paragraphs[i].class = Classification::NearGood;
                break;
            }
            distance += paragraphs[j].text.chars().count();
        }
    }

    // Pass 2: resolve short paragraphs from their nearest decided
    // neighbours. Labels are staged and applied after the scan so every
    // decision sees the pre-pass state.
    let mut staged: Vec<(usize, Classification)> = Vec::new();
    for i in 0..paragraphs.len() {
        if paragraphs[i].class != Classification::Short {
            continue;
        }
        let prev = prev_neighbour(paragraphs, i, true);
        let next = next_neighbour(paragraphs, i, true);
        let class = if prev == Classification::Good && next == Classification::Good {
            Classification::Good
        } else if prev == Classification::Bad && next == Classification::Bad {
            Classification::Bad
        } else if (prev == Classification::Bad
            && prev_neighbour(paragraphs, i, false) == Classification::NearGood)
            || (next == Classification::Bad
                && next_neighbour(paragraphs, i, false) == Classification::NearGood)
        {
            Classification::Good
        } else {
            Classification::Bad
        };
        staged.push((i, class));
    }
    for (i, class) in staged {
        paragraphs[i].class = class;
    }

    // Pass 3: resolve neargood in place. Later decisions in the same pass
    // see earlier ones; neargood is already invisible to the strict
    // neighbour search, so this cannot cascade.
    for i in 0..paragraphs.len() {
        if paragraphs[i].class != Classification::NearGood {
            continue;
        }
        let prev = prev_neighbour(paragraphs, i, true);
        let next = next_neighbour(paragraphs, i, true);
        paragraphs[i].class = if prev == Classification::Bad && next == Classification::Bad {
            Classification::Bad
        } else {
            Classification::Good
        };
    }

    // Pass 4: second chance for headings whose surroundings resolved to
    // good after pass 1 ran.
    for i in 0..paragraphs.len() {
        if !(paragraphs[i].heading
            && paragraphs[i].class == Classification::Bad
            && paragraphs[i].cf_class != Classification::Bad)
        {
            continue;
        }
        let mut distance = 0;
        for j in i + 1..paragraphs.len() {
            if distance > max_heading_distance {
                break;
            }
            if paragraphs[j].class == Classification::Good {
                paragraphs[i].class = Classification::Good;
                break;
            }
            distance += paragraphs[j].text.chars().count();
        }
    }
}

/// Walk outward over `indices`, skipping short paragraphs always and
/// neargood ones when `ignore_neargood` is set, until a decided class is
/// found. The document edge counts as bad.
fn neighbour(
    paragraphs: &[Paragraph],
    indices: impl Iterator<Item = usize>,
    ignore_neargood: bool,
) -> Classification {
    for idx in indices {
        match paragraphs[idx].class {
            c @ (Classification::Good | Classification::Bad) => return c,
            Classification::NearGood if !ignore_neargood => return Classification::NearGood,
            Classification::Short | Classification::NearGood => {}
        }
    }
    Classification::Bad
}

fn prev_neighbour(paragraphs: &[Paragraph], i: usize, ignore_neargood: bool) -> Classification {
    neighbour(paragraphs, (0..i).rev(), ignore_neargood)
}

fn next_neighbour(paragraphs: &[Paragraph], i: usize, ignore_neargood: bool) -> Classification {
    neighbour(paragraphs, i + 1..paragraphs.len(), ignore_neargood)
}
