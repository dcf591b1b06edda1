//! Attaching resolved image URLs to listing items.

use futures_util::future::try_join_all;
use tracing::warn;

use crate::domain::Error;
use crate::domain::ImageKey;
use crate::domain::ports::{ImageResolver, ImageResolverError};

fn map_resolver_error(error: ImageResolverError) -> Error {
    warn!(error = %error, "image URL resolution failed");
    Error::internal(format!("image resolution failed: {error}"))
}

/// Resolve the URL for one optional image.
pub(crate) async fn resolve_optional(
    resolver: &dyn ImageResolver,
    image: Option<&ImageKey>,
) -> Result<Option<String>, Error> {
    match image {
        Some(key) => resolver
            .resolve(key)
            .await
            .map(Some)
            .map_err(map_resolver_error),
        None => Ok(None),
    }
}

/// Resolve every item's image concurrently and project it with `project`.
///
/// A single failure fails the whole batch.
pub(crate) async fn resolve_all<T, P, F>(
    resolver: &dyn ImageResolver,
    items: Vec<T>,
    image_of: impl Fn(&T) -> Option<&ImageKey>,
    project: F,
) -> Result<Vec<P>, Error>
where
    F: Fn(&T, Option<String>) -> P,
{
    let urls = try_join_all(
        items
            .iter()
            .map(|item| resolve_optional(resolver, image_of(item))),
    )
    .await?;

    Ok(items
        .iter()
        .zip(urls)
        .map(|(item, url)| project(item, url))
        .collect())
}

#[cfg(test)]
mod tests {
    //! Concurrent resolution behaviour.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockImageResolver;
    use rstest::rstest;

    fn key(name: &str) -> ImageKey {
        ImageKey::new(name).expect("valid image name")
    }

    #[rstest]
    #[tokio::test]
    async fn items_without_images_skip_the_resolver() {
        let mut resolver = MockImageResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|image| Ok(format!("https://img/{}", image.object_key())));

        let items = vec![Some(key("a")), None];
        let urls = resolve_all(&resolver, items, Option::as_ref, |_, url| url)
            .await
            .expect("resolution succeeds");

        assert_eq!(urls, vec![Some("https://img/a.jpeg".to_owned()), None]);
    }

    #[rstest]
    #[tokio::test]
    async fn one_failure_fails_the_batch() {
        let mut resolver = MockImageResolver::new();
        resolver.expect_resolve().returning(|image| {
            if image.as_str() == "broken" {
                Err(ImageResolverError::backend("signing failed"))
            } else {
                Ok("https://img/ok".to_owned())
            }
        });

        let items = vec![Some(key("fine")), Some(key("broken"))];
        let error = resolve_all(&resolver, items, Option::as_ref, |_, url| url)
            .await
            .expect_err("batch fails");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
