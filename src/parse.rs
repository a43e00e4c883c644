use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Visible text of the pagination anchor on category listing pages.
pub(crate) const NEXT_PAGE_LABEL: &str = "Следующая страница";

/// Extracts `(letter, entry count)` pairs from every letter group on a
/// category listing page.
///
/// The expected structure is a `div#mw-pages` container holding a
/// `.mw-content-ltr` block with one `.mw-category-group` per letter; each
/// group has an `h3` with the letter and a `ul` whose direct `li` children
/// are the entries. A page missing the container or the content block yields
/// no pairs; that is logged as a warning and treated as "nothing to
/// extract", not an error. Groups missing their heading or list are skipped.
pub(crate) fn letter_counts(doc: &Html) -> Result<Vec<(String, usize)>> {
    let pages_sel = create_selector("div#mw-pages")?;
    let content_sel = create_selector("div.mw-content-ltr")?;
    let group_sel = create_selector("div.mw-category-group")?;
    let heading_sel = create_selector("h3")?;
    let list_sel = create_selector("ul")?;

    let Some(pages_div) = doc.select(&pages_sel).next() else {
        warn!("no <div id=\"mw-pages\"> on page");
        return Ok(Vec::new());
    };
    let Some(content_div) = pages_div.select(&content_sel).next() else {
        warn!("no .mw-content-ltr block on page");
        return Ok(Vec::new());
    };

    let mut counts = Vec::new();
    for group in content_div.select(&group_sel) {
        let (Some(heading), Some(list)) = (
            group.select(&heading_sel).next(),
            group.select(&list_sel).next(),
        ) else {
            continue;
        };

        let letter = heading.text().collect::<String>().trim().to_string();
        // Direct children only, so entries with nested lists count once.
        let count = list
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "li")
            .count();
        counts.push((letter, count));
    }
    Ok(counts)
}

/// Finds the next-page anchor and resolves its target against `base`.
/// Returns `None` when the page has no next link, which is how a run
/// terminates normally.
pub(crate) fn next_page_url(doc: &Html, base: &str) -> Result<Option<String>> {
    let anchor_sel = create_selector("a")?;
    let link = doc
        .select(&anchor_sel)
        .find(|a| a.text().collect::<String>().trim() == NEXT_PAGE_LABEL);

    let Some(link) = link else {
        debug!("no next-page link on page");
        return Ok(None);
    };
    let Some(href) = link.value().attr("href") else {
        debug!("next-page anchor has no href");
        return Ok(None);
    };

    let next = Url::parse(base)
        .and_then(|b| b.join(href))
        .map_err(|e| Error::UrlParse(e.to_string()))?;
    debug!(next = %next, "next page");
    Ok(Some(next.into()))
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BASE_URL;

    const LISTING: &str = r#"
    <div id="mw-pages">
      <div class="mw-content-ltr">
        <div class="mw-category-group">
          <h3>А</h3>
          <ul>
            <li><a href="/wiki/Акула">Акула</a></li>
            <li><a href="/wiki/Амурский_тигр">Амурский тигр</a></li>
          </ul>
        </div>
        <div class="mw-category-group">
          <h3>Б</h3>
          <ul><li><a href="/wiki/Бобр">Бобр</a></li></ul>
        </div>
      </div>
    </div>
    "#;

    #[test]
    fn extracts_letter_counts_in_document_order() {
        let doc = Html::parse_document(LISTING);
        let counts = letter_counts(&doc).unwrap();
        assert_eq!(
            counts,
            vec![("А".to_string(), 2), ("Б".to_string(), 1)]
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = Html::parse_document(LISTING);
        let first = letter_counts(&doc).unwrap();
        let second = letter_counts(&doc).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_container_yields_no_counts() {
        let doc = Html::parse_document("<p>Конец списка</p>");
        assert!(letter_counts(&doc).unwrap().is_empty());
    }

    #[test]
    fn missing_content_block_yields_no_counts() {
        let doc = Html::parse_document(r#"<div id="mw-pages"><p>пусто</p></div>"#);
        assert!(letter_counts(&doc).unwrap().is_empty());
    }

    #[test]
    fn group_without_list_is_skipped() {
        let html = r#"
        <div id="mw-pages"><div class="mw-content-ltr">
          <div class="mw-category-group"><h3>В</h3></div>
          <div class="mw-category-group">
            <h3>Г</h3><ul><li>Гусь</li></ul>
          </div>
        </div></div>
        "#;
        let doc = Html::parse_document(html);
        let counts = letter_counts(&doc).unwrap();
        assert_eq!(counts, vec![("Г".to_string(), 1)]);
    }

    #[test]
    fn nested_list_items_count_once() {
        let html = r#"
        <div id="mw-pages"><div class="mw-content-ltr">
          <div class="mw-category-group">
            <h3>Д</h3>
            <ul><li>Дрозд<ul><li>подвид</li></ul></li></ul>
          </div>
        </div></div>
        "#;
        let doc = Html::parse_document(html);
        let counts = letter_counts(&doc).unwrap();
        assert_eq!(counts, vec![("Д".to_string(), 1)]);
    }

    #[test]
    fn next_link_resolves_relative_href_against_base() {
        let doc = Html::parse_document(
            r#"<a href="/wiki/Категория:Животные_по_алфавиту?pagefrom=Page2">Следующая страница</a>"#,
        );
        let next = next_page_url(&doc, BASE_URL).unwrap();
        let expected: String = Url::parse(BASE_URL)
            .unwrap()
            .join("/wiki/Категория:Животные_по_алфавиту?pagefrom=Page2")
            .unwrap()
            .into();
        assert_eq!(next, Some(expected));
    }

    #[test]
    fn absent_next_link_yields_none() {
        let doc = Html::parse_document("<p>Конец списка</p>");
        assert_eq!(next_page_url(&doc, BASE_URL).unwrap(), None);
    }

    #[test]
    fn next_anchor_without_href_yields_none() {
        let doc = Html::parse_document("<a>Следующая страница</a>");
        assert_eq!(next_page_url(&doc, BASE_URL).unwrap(), None);
    }

    #[test]
    fn anchor_with_other_text_is_not_a_next_link() {
        let doc = Html::parse_document(r#"<a href="/x">Предыдущая страница</a>"#);
        assert_eq!(next_page_url(&doc, BASE_URL).unwrap(), None);
    }
}
