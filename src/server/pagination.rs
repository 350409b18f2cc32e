use serde::Deserialize;

pub const QUESTIONS_PER_PAGE: usize = 10;

// The page parameter arrives as a string and anything that does not parse
// silently becomes page 1, the same fallback the frontend relies on.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|page| page.parse().ok())
            .unwrap_or(1)
    }
}

/// Slice of up to [`QUESTIONS_PER_PAGE`] items starting at offset
/// `(page - 1) * QUESTIONS_PER_PAGE`. Out-of-range pages (and page 0) yield
/// an empty vec, never an error; callers decide what that means.
pub fn paginate<T>(items: Vec<T>, page: usize) -> Vec<T> {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
    else {
        return Vec::new();
    };
    items.into_iter().skip(start).take(QUESTIONS_PER_PAGE).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_owned),
        }
    }

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(query(None).page(), 1);
        assert_eq!(query(Some("3")).page(), 3);
        assert_eq!(query(Some("not-a-number")).page(), 1);
        assert_eq!(query(Some("")).page(), 1);
    }

    #[test]
    fn pages_slice_in_order() {
        let items: Vec<u32> = (0..25).collect();

        assert_eq!(paginate(items.clone(), 1), (0..10).collect::<Vec<_>>());
        assert_eq!(paginate(items.clone(), 2), (10..20).collect::<Vec<_>>());
        assert_eq!(paginate(items.clone(), 3), (20..25).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (0..5).collect();

        assert!(paginate(items.clone(), 0).is_empty());
        assert!(paginate(items.clone(), 2).is_empty());
        assert!(paginate(items.clone(), usize::MAX).is_empty());
        assert!(paginate(Vec::<u32>::new(), 1).is_empty());
    }
}
