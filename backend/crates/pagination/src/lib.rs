//! Opaque cursor and page-size primitives shared by listing endpoints.
//!
//! Listing endpoints page through keyed collections without exposing storage
//! details to clients. A [`Cursor`] wraps the last key a client has seen and
//! serialises it into an opaque, URL-safe token. [`PageSize`] normalises the
//! client-supplied limit, and [`Page`] pairs the items of one page with the
//! cursor that resumes after them.
//!
//! # Examples
//!
//! ```
//! use pagination::{Cursor, Page, PageSize};
//!
//! let size = PageSize::parse("2").expect("valid page size");
//! let page = Page::from_overfetch(vec!["a", "b", "c"], size, |item| (*item).to_owned());
//! assert_eq!(page.items(), &["a", "b"]);
//!
//! let token = page.next().expect("more items follow").encode().expect("encodes");
//! let resumed: Cursor<String> = Cursor::decode(&token).expect("decodes");
//! assert_eq!(resumed.key(), "b");
//! ```

mod cursor;
mod page;
mod page_size;

pub use cursor::{Cursor, CursorError};
pub use page::Page;
pub use page_size::{PageSize, PageSizeError};
