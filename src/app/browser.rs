/// Opens article links outside the terminal.
pub trait Browser {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Hands the URL to the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}
