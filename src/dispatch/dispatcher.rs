use serde::Serialize;
use serde_json::Value;
use std::ops::Deref;
use tracing::debug;

use super::error::Result;
use crate::filters::{FilterChain, FilterRequest};
use crate::handlers::HandlerRegistry;
use crate::media::{Accessible, FileEntity, Options, read_field};
use crate::templates::{RenderError, RenderPayload, TemplateRenderer, TemplateResolver};

/// Outcome of [`MediaDispatcher::resolve_filtered_media`].
///
/// Unfiltered resolution writes the canonical URI into the caller's entity
/// and hands it back; filtered resolution returns a clone carrying the
/// filter's cache path and leaves the caller's entity untouched, so one
/// entity can be filtered several ways in the same pass.
#[derive(Debug)]
pub enum ResolvedMedia<'a, E> {
    Canonical(&'a E),
    Filtered(E),
}

impl<E> ResolvedMedia<'_, E> {
    pub fn is_filtered(&self) -> bool {
        matches!(self, ResolvedMedia::Filtered(_))
    }

    pub fn into_owned(self) -> E
    where
        E: Clone,
    {
        match self {
            ResolvedMedia::Canonical(entity) => entity.clone(),
            ResolvedMedia::Filtered(entity) => entity,
        }
    }
}

impl<E> Deref for ResolvedMedia<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        match self {
            ResolvedMedia::Canonical(entity) => entity,
            ResolvedMedia::Filtered(entity) => entity,
        }
    }
}

/// Resolves media to their storage or derivative location and renders them
/// through aliased templates
#[derive(Debug, Clone)]
pub struct MediaDispatcher {
    handlers: HandlerRegistry,
    filters: FilterChain,
    templates: TemplateResolver,
}

impl MediaDispatcher {
    pub fn new(handlers: HandlerRegistry, filters: FilterChain, templates: TemplateResolver) -> Self {
        Self {
            handlers,
            filters,
            templates,
        }
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    pub fn templates(&self) -> &TemplateResolver {
        &self.templates
    }

    /// Resolve `entity` to its canonical URI, or to the cache path of the
    /// derivative produced by the filter registered as `filter_alias`.
    ///
    /// An unknown alias behaves like no alias. A missing handler fails even
    /// when a filter is requested.
    pub async fn resolve_filtered_media<'a, E>(
        &self,
        entity: &'a mut E,
        filter_alias: Option<&str>,
        options: &Options,
    ) -> Result<ResolvedMedia<'a, E>>
    where
        E: FileEntity + Clone,
    {
        let filter = filter_alias
            .and_then(|alias| self.filters.get(Some(alias)).map(|filter| (alias, filter)));
        let handler = self.handlers.handler_for(&*entity)?;
        let source_uri = handler.uri(&*entity);

        let Some((alias, filter)) = filter else {
            debug!(
                entity = entity.id(),
                handler = handler.name(),
                uri = %source_uri,
                "Resolved canonical media"
            );
            entity.set_path(source_uri);
            return Ok(ResolvedMedia::Canonical(entity));
        };

        let path = filter
            .handle(FilterRequest {
                alias,
                entity: &*entity,
                source_uri: &source_uri,
                options,
            })
            .await?;

        debug!(
            entity = entity.id(),
            alias,
            filter = filter.name(),
            %path,
            "Resolved filtered media"
        );

        let mut media = entity.clone();
        media.set_path(path);
        Ok(ResolvedMedia::Filtered(media))
    }

    /// Render `entity` with the template `template_alias` resolves to.
    ///
    /// The renderer's output and errors are returned as-is.
    pub fn render_template<E, R>(
        &self,
        renderer: &R,
        entity: &E,
        template_alias: Option<&str>,
        options: &Options,
    ) -> std::result::Result<R::Output, RenderError>
    where
        E: Serialize,
        R: TemplateRenderer,
    {
        let template = self.templates.resolve(template_alias);
        debug!(template, "Rendering media template");

        renderer.render(
            template,
            &RenderPayload {
                media: entity,
                options,
            },
        )
    }

    /// Read a named field of `entity` (`created_at` reads `getCreatedAt`)
    pub fn read_metadata<E: Accessible>(
        &self,
        property: &str,
        entity: Option<&E>,
    ) -> Result<Option<Value>> {
        Ok(read_field(property, entity)?)
    }
}
