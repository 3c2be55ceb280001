pub trait StrExt: AsRef<str> {
    fn nonblank_to_some(&self) -> Option<String> {
        Some(self.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }
}

impl<T: AsRef<str>> StrExt for T {}

pub trait OptionStrExt {
    fn nonblank(&self) -> Option<String>;
}

impl<T: AsRef<str>> OptionStrExt for Option<T> {
    fn nonblank(&self) -> Option<String> {
        self.as_ref().and_then(StrExt::nonblank_to_some)
    }
}

#[macro_export]
macro_rules! error_exit {
    ($($arg:tt)+) => ({
        log::error!($($arg)+);
        std::process::exit(1)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_none() {
        assert_eq!("".nonblank_to_some(), None);
        assert_eq!(" \t\n".nonblank_to_some(), None);
        assert_eq!(None::<&str>.nonblank(), None);
        assert_eq!(Some("  ").nonblank(), None);
    }

    #[test]
    fn nonblank_strings_are_trimmed() {
        assert_eq!(" abc ".nonblank_to_some(), Some("abc".into()));
        assert_eq!(Some(" a b ").nonblank(), Some("a b".into()));
    }
}
