//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of `Args`.
///
/// Commands, collaborators and fakes all speak this trait, so a caller is
/// generic over whatever executes the operation it needs.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}

impl<H, Args> Handler<Args> for &H
where
    H: Handler<Args> + ?Sized,
{
    type Ok = H::Ok;
    type Err = H::Err;

    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>> {
        (**self).execute(args)
    }
}
