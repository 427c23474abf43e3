use serde::Serialize;

use crate::date::{render_post_date, TimestampError};
use crate::excerpt::build_excerpt;
use crate::issue::{IssueLabel, IssueUser};
use crate::policy::DatePolicy;
use crate::post::{BlogPost, CoverImage};

/// Number of posts shown in the landing page preview
pub const LATEST_POSTS: usize = 4;

/// Error type for building list and detail views
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("Page must be 1 or greater")]
    InvalidPage,

    #[error("Limit must be 1 or greater")]
    InvalidLimit,

    #[error("Page {page} is out of range. Only {total_pages} pages available.")]
    PageOutOfRange { page: usize, total_pages: usize },

    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

/// Post card shown in list views
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PostCard {
    pub number: u64,
    pub title: String,
    pub cover_image: Option<CoverImage>,
    pub labels: Vec<IssueLabel>,
    pub published: String,
    pub excerpt: String,
    pub url: String,
}

/// Pagination metadata for list output
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ListPaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_posts: usize,
    pub limit: usize,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// Complete list output with cards and pagination
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ListOutput {
    pub posts: Vec<PostCard>,
    pub pagination: ListPaginationInfo,
}

/// Full post shown in the detail view
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PostDetail {
    pub number: u64,
    pub title: String,
    pub author: IssueUser,
    pub published: String,
    pub updated: String,
    pub cover_image: Option<CoverImage>,
    pub labels: Vec<IssueLabel>,
    pub body: Option<String>,
    pub url: String,
}

/// Calculate pagination bounds for a given page
///
/// Returns (start_index, end_index) for slicing the posts. An empty list is a
/// valid, empty first page.
pub fn calculate_pagination(
    total_posts: usize,
    page: usize,
    limit: usize,
) -> Result<(usize, usize), ListingError> {
    if page == 0 {
        return Err(ListingError::InvalidPage);
    }
    if limit == 0 {
        return Err(ListingError::InvalidLimit);
    }

    if total_posts == 0 && page == 1 {
        return Ok((0, 0));
    }

    let out_of_range = || ListingError::PageOutOfRange {
        page,
        total_pages: total_posts.div_ceil(limit),
    };

    let start = (page - 1).checked_mul(limit).ok_or_else(out_of_range)?;
    if start >= total_posts {
        return Err(out_of_range());
    }

    let end = start.checked_add(limit).unwrap_or(usize::MAX).min(total_posts);
    Ok((start, end))
}

/// The newest `count` posts, for the landing page preview
pub fn latest_posts(posts: &[BlogPost], count: usize) -> &[BlogPost] {
    &posts[..count.min(posts.len())]
}

/// Build the card for a single post
pub fn build_post_card(post: &BlogPost, dates: &DatePolicy) -> Result<PostCard, TimestampError> {
    Ok(PostCard {
        number: post.number,
        title: post.title.clone(),
        cover_image: post.cover_image.clone(),
        labels: post.labels.clone(),
        published: render_post_date(&post.created_at, dates)?,
        excerpt: build_excerpt(post.body.as_deref()),
        url: post.html_url.clone(),
    })
}

/// Build one page of post cards with pagination metadata
pub fn build_list_output(
    posts: &[BlogPost],
    page: usize,
    limit: usize,
    dates: &DatePolicy,
) -> Result<ListOutput, ListingError> {
    let (start, end) = calculate_pagination(posts.len(), page, limit)?;

    let cards = posts[start..end]
        .iter()
        .map(|post| build_post_card(post, dates))
        .collect::<Result<Vec<_>, _>>()?;

    let total_posts = posts.len();
    let total_pages = total_posts.div_ceil(limit);

    let next_page = if page < total_pages {
        Some(format!("palmblog list --page {} --limit {limit}", page + 1))
    } else {
        None
    };

    let prev_page = if page > 1 {
        Some(format!("palmblog list --page {} --limit {limit}", page - 1))
    } else {
        None
    };

    Ok(ListOutput {
        posts: cards,
        pagination: ListPaginationInfo {
            current_page: page,
            total_pages,
            total_posts,
            limit,
            next_page_command: next_page,
            prev_page_command: prev_page,
        },
    })
}

/// Build the detail view of a post
pub fn build_post_detail(post: &BlogPost, dates: &DatePolicy) -> Result<PostDetail, TimestampError> {
    Ok(PostDetail {
        number: post.number,
        title: post.title.clone(),
        author: post.author.clone(),
        published: render_post_date(&post.created_at, dates)?,
        updated: render_post_date(&post.updated_at, dates)?,
        cover_image: post.cover_image.clone(),
        labels: post.labels.clone(),
        body: post.body.clone(),
        url: post.html_url.clone(),
    })
}
