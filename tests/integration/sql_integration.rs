use water::sql::{self, SqlConnection, SqlRequest, SqlTemplate, SqliteConnection};
use water::{impl_record, Error, SqlError, Value};

#[derive(Debug, Clone, Default, PartialEq)]
struct House {
    house_id: i64,
    street_name: String,
    rooms: i32,
    listed: bool,
    owner: Option<String>,
}

impl_record!(House {
    house_id: i64,
    street_name: String,
    rooms: i32,
    listed: bool,
    owner: Option<String>,
});

fn seeded() -> SqliteConnection {
    let mut conn = SqliteConnection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE house (
            house_id INTEGER PRIMARY KEY,
            street_name TEXT NOT NULL,
            rooms INTEGER NOT NULL,
            listed INTEGER NOT NULL,
            owner TEXT
        );",
    )
    .unwrap();
    for (id, street, rooms, listed) in [(1, "Elm", 3, true), (2, "Oak", 5, false), (3, "Ash", 2, true)] {
        SqlRequest::update(
            SqlTemplate::new(
                "INSERT INTO house (house_id, street_name, rooms, listed) VALUES (#{id}, #{street}, #{rooms}, #{listed})",
            )
            .param("id", id)
            .param("street", street)
            .param("rooms", rooms)
            .param("listed", listed),
        )
        .execute(&mut conn)
        .unwrap();
    }
    conn
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_into_records() {
        let mut conn = seeded();
        let response = SqlRequest::query(
            SqlTemplate::new("SELECT * FROM ${table} WHERE listed = #{listed} ORDER BY house_id")
                .param("table", "house")
                .param("listed", true),
        )
        .execute(&mut conn)
        .unwrap();

        let houses: Vec<House> = response.to_records().unwrap();
        assert_eq!(
            houses,
            vec![
                House {
                    house_id: 1,
                    street_name: "Elm".into(),
                    rooms: 3,
                    listed: true,
                    owner: None,
                },
                House {
                    house_id: 3,
                    street_name: "Ash".into(),
                    rooms: 2,
                    listed: true,
                    owner: None,
                },
            ]
        );
    }

    #[test]
    fn test_real_and_text_cells_fill_integer_fields() {
        let mut conn = seeded();
        let houses: Vec<House> = SqlRequest::query(SqlTemplate::new(
            "SELECT '9' AS house_id, street_name, rooms * 1.5 AS rooms, listed FROM house WHERE house_id = 2",
        ))
        .execute(&mut conn)
        .unwrap()
        .to_records()
        .unwrap();

        assert_eq!(
            houses,
            vec![House {
                house_id: 9,
                street_name: "Oak".into(),
                rooms: 7,
                listed: false,
                owner: None,
            }]
        );
    }

    #[test]
    fn test_select_helper_camel_cases() {
        let mut conn = seeded();
        let rows = sql::select(&mut conn, "SELECT house_id, street_name FROM house WHERE rooms > 4").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["streetName"], Value::String("Oak".into()));
    }

    #[test]
    fn test_commit_keeps_changes() {
        let mut conn = seeded();
        {
            let mut response = SqlRequest::update(
                SqlTemplate::new("UPDATE house SET owner = #{owner} WHERE rooms >= #{min}")
                    .param("owner", "kim")
                    .param("min", 3),
            )
            .open_transaction()
            .execute(&mut conn)
            .unwrap();
            assert_eq!(response.affected(), 2);
            response.commit().unwrap();
        }
        assert!(!conn.in_transaction());
        let owned = sql::select(&mut conn, "SELECT house_id FROM house WHERE owner = 'kim'").unwrap();
        assert_eq!(owned.len(), 2);
    }

    #[test]
    fn test_missing_parameter_never_reaches_driver() {
        let mut conn = seeded();
        let err = SqlRequest::query(SqlTemplate::new("SELECT * FROM house WHERE house_id = #{id}"))
            .execute(&mut conn)
            .err()
            .unwrap();
        assert!(matches!(err, Error::SqlError(SqlError::MissingParameter(_))));
    }

    #[test]
    fn test_file_backed_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.db");
        {
            let mut conn = SqliteConnection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE kv (k TEXT, v INTEGER); INSERT INTO kv VALUES ('a', 1);")
                .unwrap();
        }
        let mut conn = SqliteConnection::open(&path).unwrap();
        let rows = conn.query("SELECT v FROM kv WHERE k = ?", &[Value::String("a".into())]).unwrap();
        assert_eq!(rows.rows, vec![vec![Value::Int(1)]]);
    }
}
