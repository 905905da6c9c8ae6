/// A host-owned resource released when the guard goes out of scope.
///
/// The guard borrows the host mutably for its whole lifetime; use [`Scoped::parts`]
/// to reach both while it is alive. Guards nest: acquire the inner one from
/// `parts().0` and it is released before the outer one.
pub struct Scoped<'h, H, R> {
    host: &'h mut H,
    resource: R,
    release: fn(&mut H, &R),
}

impl<'h, H, R> Scoped<'h, H, R> {
    /// Guard `resource`, calling `release` with it on drop.
    pub fn new(host: &'h mut H, resource: R, release: fn(&mut H, &R)) -> Self {
        Self {
            host,
            resource,
            release,
        }
    }

    /// Host and resource together.
    pub fn parts(&mut self) -> (&mut H, &R) {
        (&mut *self.host, &self.resource)
    }

    /// The borrowed host.
    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// The guarded resource.
    pub fn resource(&self) -> &R {
        &self.resource
    }
}

impl<H, R> Drop for Scoped<'_, H, R> {
    fn drop(&mut self) {
        (self.release)(&mut *self.host, &self.resource);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/scoped.rs"]
mod tests;
