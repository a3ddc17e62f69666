use crate::event::queue::UiRequest;
use crate::foundation::error::{ReflowError, ReflowResult};
use crate::subject::attr::{AttrDescriptor, RefreshCause};
use crate::subject::protocol::{AttrValue, Subject, identity_changed};
use crate::tree::ControlTree;
use crate::tree::id::NodeId;

impl ControlTree {
    /// Re-resolve `id` and everything below it, pushing the values into the
    /// widgets.
    ///
    /// Containers whose subject identity changed are rebuilt. Failures of
    /// custom update handlers and of individual descendants are logged and do
    /// not stop the traversal.
    #[tracing::instrument(skip(self))]
    pub fn refresh(&mut self, id: NodeId) -> ReflowResult<()> {
        self.refresh_inner(id, RefreshCause::Update)?;
        let scope = self.node(id)?.parent.unwrap_or(id);
        self.commit_frames(scope);
        Ok(())
    }

    pub(crate) fn refresh_inner(&mut self, id: NodeId, cause: RefreshCause) -> ReflowResult<()> {
        let previous = self.node(id)?.built_for.clone();
        self.update_subject(id)?;

        let node = self.node_mut(id)?;
        let bound = node.subject.clone();
        if let Some(widget) = node.widget.as_mut() {
            widget.set_content(&bound);
        }
        let owner = bound.upgrade();
        let children: Vec<NodeId> = node.children.iter().map(|(_, c)| *c).collect();
        let rebuild = node.parent.is_some()
            && node.attr.as_deref().is_some_and(AttrDescriptor::is_container)
            && identity_changed(previous.as_ref(), owner.as_ref());
        if rebuild {
            return self.rebuild(id);
        }

        for child in children {
            if let Some(owner) = &owner {
                self.run_update_handler(child, owner.as_ref(), cause);
            }
            if let Err(error) = self.refresh_inner(child, cause) {
                tracing::warn!(path = %self.path_name(child), %error, "refresh failed");
            }
        }
        Ok(())
    }

    // Handler failures are isolated to the control they belong to.
    pub(crate) fn run_update_handler(
        &self,
        child: NodeId,
        owner: &dyn Subject,
        cause: RefreshCause,
    ) {
        let Some(attr) = self.get(child).and_then(|n| n.attr.clone()) else {
            return;
        };
        if let Err(error) = attr.run_update_handler(owner, cause) {
            tracing::warn!(path = %self.path_name(child), %error, "update handler failed");
        }
    }

    /// Execute every queued request; requests for discarded nodes are skipped.
    ///
    /// Returns how many requests ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Some(request) = self.inbox.try_next() {
            if !self.contains(request.node()) {
                tracing::debug!(?request, "skipping request for discarded node");
                continue;
            }
            let result = match request {
                UiRequest::Refresh(id) => self.refresh(id),
            };
            if let Err(error) = result {
                tracing::warn!(?request, %error, "ui request failed");
            }
            ran += 1;
        }
        ran
    }

    /// Write an edited value back through the attribute's setter.
    ///
    /// The subject announces the change through its own events; the node is
    /// refreshed when those are drained.
    pub fn commit_edit(&mut self, id: NodeId, value: AttrValue) -> ReflowResult<()> {
        let node = self.node(id)?;
        let (Some(attr), Some(parent)) = (node.attr.clone(), node.parent) else {
            return Err(ReflowError::validation("the root container is not editable"));
        };
        let owner = self.node(parent)?.subject.upgrade().ok_or_else(|| {
            ReflowError::attribute(format!("subject owning '{}' is gone", self.path_name(id)))
        })?;
        tracing::debug!(path = %self.path_name(id), ?value, "committing edit");
        attr.set(owner.as_ref(), value)
    }
}
