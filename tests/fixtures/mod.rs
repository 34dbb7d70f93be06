use chrono::{NaiveDate, NaiveDateTime};
use water::types::IntoValue;
use water::{impl_record, Mapping, TreeNode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub name: String,
    pub age: i32,
    pub email: Option<String>,
    pub joined: NaiveDateTime,
}

impl_record!(User {
    name: String,
    age: i32,
    email: Option<String>,
    joined: NaiveDateTime,
});

/// Shares `name` and `age` with [`User`], but `age` is declared as `i64`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Employee {
    pub name: String,
    pub age: i64,
    pub title: String,
}

impl_record!(Employee { name: String, age: i64, title: String });

/// Embeds a [`User`] and shadows its `name`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Member {
    pub name: String,
    pub level: u8,
    pub secret: String,
    pub user: User,
}

impl_record!(Member {
    name: String,
    #[readonly]
    level: u8,
    #[writeonly]
    secret: String,
} extends user: User);

#[derive(Debug, Clone, PartialEq)]
pub struct Dept {
    pub id: u32,
    pub parent: u32,
    pub name: String,
    pub children: Vec<Dept>,
}

impl TreeNode for Dept {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn parent_id(&self) -> u32 {
        self.parent
    }

    fn set_children(&mut self, children: Vec<Self>) {
        self.children = children;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
    pub id: i64,
    pub pid: i64,
    pub label: String,
}

impl_record!(Category { id: i64, pid: i64, label: String });

pub struct TestFixtures;

impl TestFixtures {
    pub fn joined() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    pub fn alice() -> User {
        User {
            name: "Alice".into(),
            age: 30,
            email: Some("alice@example.com".into()),
            joined: Self::joined(),
        }
    }

    pub fn users(count: i32) -> Vec<User> {
        (0..count)
            .map(|i| User {
                name: format!("user-{i}"),
                age: i,
                email: None,
                joined: Self::joined(),
            })
            .collect()
    }

    pub fn dept(id: u32, parent: u32, name: &str) -> Dept {
        Dept {
            id,
            parent,
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn category(id: i64, pid: i64, label: &str) -> Category {
        Category {
            id,
            pid,
            label: label.into(),
        }
    }

    /// `{id, pid}` mappings for the four-node sample forest
    pub fn tree_rows() -> Vec<Mapping> {
        [(1, 0), (2, 1), (3, 1), (4, 2)]
            .into_iter()
            .map(|(id, pid): (i64, i64)| {
                let mut row = Mapping::new();
                row.insert("id".into(), id.into_value());
                row.insert("pid".into(), pid.into_value());
                row
            })
            .collect()
    }
}
