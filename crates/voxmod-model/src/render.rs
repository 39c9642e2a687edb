//! Seam between a model and whatever draws it.
//!
//! The model never talks to a graphics API. A host implements
//! [`MeshRenderer`] for its backend and keeps one [`MeshBinding`] per model;
//! the binding uploads the mesh when its version changes and releases the
//! previous upload on every path.

use voxmod_mesh::{VertexAttribute, VERTEX_LAYOUT};

use crate::model::{MeshView, VoxelModel};

/// Backend able to turn mesh buffers into drawable resources.
pub trait MeshRenderer {
    /// Backend resource for one uploaded mesh.
    type Handle;
    /// Upload failure.
    type Error;

    /// Upload vertex and index buffers described by `layout`.
    fn upload(
        &mut self,
        mesh: MeshView<'_>,
        layout: &[VertexAttribute],
    ) -> Result<Self::Handle, Self::Error>;

    /// Free a handle previously returned by `upload`.
    fn release(&mut self, handle: Self::Handle);
}

/// Tracks the uploaded copy of one model's mesh.
#[derive(Debug)]
pub struct MeshBinding<H> {
    handle: Option<H>,
    version: Option<u64>,
}

impl<H> Default for MeshBinding<H> {
    fn default() -> Self {
        Self {
            handle: None,
            version: None,
        }
    }
}

impl<H> MeshBinding<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the model mesh if it changed since the last sync.
    ///
    /// Returns `Ok(true)` when a new upload happened. The previous handle is
    /// released only after the new upload succeeds, so a failed upload keeps
    /// the old mesh drawable.
    pub fn sync<R>(&mut self, renderer: &mut R, model: &VoxelModel) -> Result<bool, R::Error>
    where
        R: MeshRenderer<Handle = H>,
    {
        let view = model.mesh_view();
        if self.version == Some(view.version) {
            return Ok(false);
        }

        let handle = renderer.upload(view, &VERTEX_LAYOUT)?;
        if let Some(old) = self.handle.replace(handle) {
            renderer.release(old);
        }
        self.version = Some(view.version);
        tracing::trace!(version = view.version, "Mesh uploaded");
        Ok(true)
    }

    /// Release the uploaded mesh, if any.
    pub fn dispose<R>(&mut self, renderer: &mut R)
    where
        R: MeshRenderer<Handle = H>,
    {
        if let Some(handle) = self.handle.take() {
            renderer.release(handle);
        }
        self.version = None;
    }

    #[inline]
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Mesh version of the current upload.
    #[inline]
    pub fn version(&self) -> Option<u64> {
        self.version
    }
}
