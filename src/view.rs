use crate::{
    client::{ApiClient, ClientError},
    models::LinkResponse,
};

/// Local list of short links as shown to a user.
///
/// Entries only ever come from server responses. The request body is never
/// used to patch local state, so the list cannot drift from the store.
#[derive(Debug, Clone, Default)]
pub struct LinkBook {
    links: Vec<LinkResponse>,
}

impl LinkBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self) -> &[LinkResponse] {
        &self.links
    }

    pub fn get(&self, id: &str) -> Option<&LinkResponse> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Replace the whole list with a server snapshot.
    pub fn replace_all(&mut self, links: Vec<LinkResponse>) {
        self.links = links;
    }

    /// Insert a server record, or overwrite the entry with the same id in
    /// place. Returns the stored entry.
    pub fn upsert(&mut self, link: LinkResponse) -> &LinkResponse {
        let pos = match self.links.iter().position(|l| l.id == link.id) {
            Some(pos) => {
                self.links[pos] = link;
                pos
            }
            None => {
                self.links.push(link);
                self.links.len() - 1
            }
        };
        &self.links[pos]
    }

    /// Drop the entry with `id`, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<LinkResponse> {
        let pos = self.links.iter().position(|l| l.id == id)?;
        Some(self.links.remove(pos))
    }

    // ── Server-backed actions ──────────────────────────────────────────────

    /// Reload everything from `GET /api/urls`.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), ClientError> {
        let links = client.list().await?;
        self.replace_all(links);
        Ok(())
    }

    pub async fn shorten(&mut self, client: &ApiClient, url: &str) -> Result<&LinkResponse, ClientError> {
        let link = client.shorten(url).await?;
        Ok(self.upsert(link))
    }

    /// Update on the server and adopt the record it returns. A 404 means the
    /// local entry is stale, so it is dropped.
    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: &str,
        new_url: &str,
    ) -> Result<&LinkResponse, ClientError> {
        match client.update(id, new_url).await {
            Ok(link) => Ok(self.upsert(link)),
            Err(ClientError::NotFound) => {
                self.remove(id);
                Err(ClientError::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove locally once the server confirmed (or already had no such id).
    pub async fn delete(&mut self, client: &ApiClient, id: &str) -> Result<(), ClientError> {
        match client.delete(id).await {
            Ok(()) => {
                self.remove(id);
                Ok(())
            }
            Err(ClientError::NotFound) => {
                self.remove(id);
                Err(ClientError::NotFound)
            }
            Err(e) => Err(e),
        }
    }
}
