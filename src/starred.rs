//! Lazy enumeration of a user's starred repositories.
//!
//! GitHub does not report a starred total on the profile, so the count is
//! obtained by walking the listing page by page. Each call to
//! [`starred_pages`] starts a fresh walk from the first page.

use anyhow::Result;
use futures::{Stream, TryStreamExt, future, stream};

use crate::github::{ProfileSource, StarredRepo};

/// Stream the starred listing of `login`, one request per polled page.
pub fn starred_pages<'a, S>(
    source: &'a S,
    login: &'a str,
) -> impl Stream<Item = Result<Vec<StarredRepo>>> + 'a
where
    S: ProfileSource + ?Sized,
{
    // None: exhausted. Some(cursor): next page to request.
    stream::try_unfold(Some(None::<String>), move |state| async move {
        let Some(cursor) = state else {
            return Ok::<_, anyhow::Error>(None);
        };
        let page = source.starred_page(login, cursor.as_deref()).await?;
        let next = if page.items.is_empty() {
            None
        } else {
            page.next.map(Some)
        };
        Ok(Some((page.items, next)))
    })
}

/// Number of repositories `login` has starred.
pub async fn count_starred<S>(source: &S, login: &str) -> Result<u64>
where
    S: ProfileSource + ?Sized,
{
    starred_pages(source, login)
        .try_fold(0u64, |total, page| {
            future::ready(Ok(total + page.len() as u64))
        })
        .await
}
