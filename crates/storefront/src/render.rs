//! Predictive search result rendering
//!
//! How matches turn into markup is up to the embedding page; the search
//! collaborator only hands the matches to a [`ResultRenderer`].

use crate::models::ProductMatch;
use tracing::warn;

/// Renders search matches into the results container's markup
pub trait ResultRenderer: Send + Sync {
    fn render(&self, matches: &[ProductMatch]) -> String;
}

/// Renders matches as a plain `<ul>` of product links
pub struct ListRenderer {
    money_format: String,
}

impl ListRenderer {
    pub fn new(money_format: impl Into<String>) -> Self {
        Self {
            money_format: money_format.into(),
        }
    }
}

impl ResultRenderer for ListRenderer {
    fn render(&self, matches: &[ProductMatch]) -> String {
        let mut out = String::from("<ul class=\"predictive-search__list\">");
        for product in matches {
            out.push_str("<li class=\"predictive-search__item\">");
            out.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape(&product.url),
                escape(&product.title)
            ));

            if let Some(price) = &product.price {
                match price.format(&self.money_format) {
                    Ok(price) => out.push_str(&format!(
                        "<span class=\"price\">{}</span>",
                        escape(&price)
                    )),
                    Err(e) => warn!("Cannot format price for {}: {}", product.title, e),
                }
            }
            out.push_str("</li>");
        }
        out.push_str("</ul>");
        out
    }
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;

    fn product(title: &str, price: Option<Price>) -> ProductMatch {
        ProductMatch {
            title: title.to_string(),
            url: format!("/products/{}", title.to_lowercase()),
            price,
            vendor: None,
            image: None,
        }
    }

    #[test]
    fn test_renders_list() {
        let renderer = ListRenderer::new("${{amount}}");
        let html = renderer.render(&[
            product("Boots", Some(Price::Text("49.00".into()))),
            product("Socks", None),
        ]);

        assert_eq!(
            html,
            "<ul class=\"predictive-search__list\">\
             <li class=\"predictive-search__item\"><a href=\"/products/boots\">Boots</a><span class=\"price\">$49.00</span></li>\
             <li class=\"predictive-search__item\"><a href=\"/products/socks\">Socks</a></li>\
             </ul>"
        );
    }

    #[test]
    fn test_escapes_markup() {
        let renderer = ListRenderer::new("${{amount}}");
        let html = renderer.render(&[product("<b>Tee</b> & \"co\"", None)]);
        assert!(html.contains("&lt;b&gt;Tee&lt;/b&gt; &amp; &quot;co&quot;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_empty_matches() {
        let renderer = ListRenderer::new("${{amount}}");
        assert_eq!(renderer.render(&[]), "<ul class=\"predictive-search__list\"></ul>");
    }
}
