use crate::models::{Link, LinkPage, PaginationMeta};
use crate::pagination::page_from_url;

#[derive(Debug, Clone, Default, PartialEq)]
/// State of the links table: the rows of one fetched page plus the local
/// search box.
///
/// The rows are a read-only cache of one backend page. Every successful fetch
/// replaces them wholesale; search never leaves the current page.
pub struct LinksView {
    links: Vec<Link>,
    meta: PaginationMeta,
    search: String,
}

impl LinksView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces rows and pagination with a freshly fetched page.
    pub fn replace(&mut self, page: LinkPage) {
        self.links = page.links;
        self.meta = page.meta;
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn meta(&self) -> &PaginationMeta {
        &self.meta
    }

    /// Page to re-fetch after a mutation.
    pub fn current_page(&self) -> u32 {
        self.meta.page.max(1)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Rows of the current page matching the search box.
    pub fn visible(&self) -> Vec<&Link> {
        filter_links(&self.links, &self.search)
    }

    pub fn can_go_next(&self) -> bool {
        self.meta.next.is_some()
    }

    pub fn can_go_prev(&self) -> bool {
        self.meta.prev.is_some()
    }

    /// Page number encoded in the backend's `next` URL.
    pub fn next_page(&self) -> Option<u32> {
        self.meta.next.as_deref().and_then(page_from_url)
    }

    /// Page number encoded in the backend's `prev` URL.
    pub fn prev_page(&self) -> Option<u32> {
        self.meta.prev.as_deref().and_then(page_from_url)
    }

    /// `Page X of Y` footer.
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.meta.page, self.meta.total_page)
    }
}

/// Case-insensitive substring filter on slug and destination URL.
pub fn filter_links<'a>(links: &'a [Link], query: &str) -> Vec<&'a Link> {
    links.iter().filter(|link| link.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, slug: &str, url: &str) -> Link {
        Link {
            id: id.to_string(),
            slug: slug.to_string(),
            url: url.to_string(),
            clicks: 0,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn page(links: Vec<Link>, next: Option<&str>, prev: Option<&str>) -> LinkPage {
        LinkPage {
            links,
            meta: PaginationMeta {
                page: 2,
                limit: 10,
                total_page: 3,
                next: next.map(str::to_string),
                prev: prev.map(str::to_string),
            },
        }
    }

    #[test]
    fn missing_next_disables_forward_navigation() {
        let mut view = LinksView::new();
        view.replace(page(vec![], None, Some("http://h/api/v1/links/?page=1")));

        assert!(!view.can_go_next());
        assert!(view.next_page().is_none());
        assert!(view.can_go_prev());
        assert_eq!(view.prev_page(), Some(1));
    }

    #[test]
    fn next_page_comes_from_backend_url() {
        let mut view = LinksView::new();
        view.replace(page(vec![], Some("http://h/api/v1/links/?page=3"), None));

        assert!(view.can_go_next());
        assert_eq!(view.next_page(), Some(3));
        assert_eq!(view.page_label(), "Page 2 of 3");
    }

    #[test]
    fn search_filters_only_current_rows() {
        let mut view = LinksView::new();
        view.replace(page(
            vec![
                link("1", "Docs", "https://docs.rs"),
                link("2", "blog", "https://Example.com/post"),
                link("3", "misc", "https://other.org"),
            ],
            None,
            None,
        ));

        view.set_search("EXAMPLE");
        let ids: Vec<&str> = view.visible().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);

        view.set_search("docs");
        assert_eq!(view.visible().len(), 1);

        view.set_search("");
        assert_eq!(view.visible().len(), 3);
    }

    #[test]
    fn replace_discards_previous_rows() {
        let mut view = LinksView::new();
        view.replace(page(vec![link("1", "a", "https://a")], None, None));
        view.replace(page(vec![link("9", "z", "https://z")], None, None));

        assert_eq!(view.links().len(), 1);
        assert_eq!(view.links()[0].id, "9");
        assert_eq!(view.current_page(), 2);
    }
}
