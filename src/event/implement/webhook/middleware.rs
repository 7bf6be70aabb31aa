mod secret_check;

pub use secret_check::secret_check;
