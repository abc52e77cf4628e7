//! SQLite-backed knowledge graph

use crate::trie::EntityTrie;
use crate::StoreError;
use claimgraph_domain::traits::KnowledgeGraphStore;
use claimgraph_domain::{Edge, RelationToken, Triplet};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

/// Persistent knowledge graph stored as an edge table
///
/// Row ids record insertion order, which is the order [`out_edges`] reports.
/// Inserting an edge that already exists is a no-op.
///
/// With [`with_inverse_edges`], every stored `head -r-> tail` is also
/// reported from the tail as `~r` back to the head, after the forward
/// edges, matching [`MemoryGraph::with_inverse_edges`].
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should open its own
/// `SqliteGraph`.
///
/// [`out_edges`]: KnowledgeGraphStore::out_edges
/// [`with_inverse_edges`]: SqliteGraph::with_inverse_edges
/// [`MemoryGraph::with_inverse_edges`]: crate::MemoryGraph::with_inverse_edges
pub struct SqliteGraph {
    conn: Connection,
    inverse_edges: bool,
}

impl SqliteGraph {
    /// Open (or create) a graph database at `path`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use claimgraph_store::SqliteGraph;
    ///
    /// let graph = SqliteGraph::open("kg.db").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Create a throwaway in-memory graph
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn,
            inverse_edges: false,
        })
    }

    /// Also answer lookups from the tail side with `~relation` edges
    pub fn with_inverse_edges(mut self) -> Self {
        self.inverse_edges = true;
        self
    }

    /// Whether incoming edges are reported as inverse out-edges
    pub fn reports_inverse_edges(&self) -> bool {
        self.inverse_edges
    }

    fn incoming_edges(&self, entity: &str) -> Result<Vec<Edge>, StoreError> {
        // Stored `~r` rows are not inverted again
        let mut stmt = self.conn.prepare(
            "SELECT relation, head FROM edges
             WHERE tail = ?1 AND substr(relation, 1, 1) <> '~'
             ORDER BY id",
        )?;
        let edges = stmt
            .query_map(params![entity], |row| {
                let relation = RelationToken::inverse(row.get::<_, String>(0)?).to_string();
                Ok(Edge::new(relation, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }

    /// Insert one edge; returns false when it was already stored
    pub fn insert_triple(&mut self, triplet: &Triplet) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO edges (head, relation, tail) VALUES (?1, ?2, ?3)",
            params![&triplet.head, &triplet.relation, &triplet.tail],
        )?;
        Ok(changed > 0)
    }

    /// Insert many edges in one transaction; returns how many were new
    pub fn insert_triples<'a, I>(&mut self, triplets: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = &'a Triplet>,
    {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO edges (head, relation, tail) VALUES (?1, ?2, ?3)",
            )?;
            for triplet in triplets {
                inserted += stmt.execute(params![&triplet.head, &triplet.relation, &triplet.tail])?;
            }
        }
        tx.commit()?;
        debug!("Inserted {} new edges", inserted);
        Ok(inserted)
    }

    /// Every edge touching `entity`, outgoing or incoming, in insertion order
    pub fn connections(&self, entity: &str) -> Result<Vec<Triplet>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT head, relation, tail FROM edges
             WHERE head = ?1 OR tail = ?1
             ORDER BY id",
        )?;
        let triplets = stmt
            .query_map(params![entity], |row| {
                Ok(Triplet::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(triplets)
    }

    /// Distinct entity names, sorted
    pub fn entity_names(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT head FROM edges UNION SELECT tail FROM edges ORDER BY 1",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Prefix index over [`entity_names`](Self::entity_names)
    pub fn entity_trie(&self) -> Result<EntityTrie, StoreError> {
        Ok(EntityTrie::from_names(self.entity_names()?))
    }

    /// Number of distinct entities
    pub fn count_entities(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM (SELECT head FROM edges UNION SELECT tail FROM edges)",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Number of stored edges
    pub fn count_edges(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl KnowledgeGraphStore for SqliteGraph {
    type Error = StoreError;

    fn out_edges(&self, entity: &str) -> Result<Vec<Edge>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT relation, tail FROM edges WHERE head = ?1 ORDER BY id")?;
        let mut edges = stmt
            .query_map(params![entity], |row| {
                Ok(Edge::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if self.inverse_edges {
            for edge in self.incoming_edges(entity)? {
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        Ok(edges)
    }

    fn contains_entity(&self, entity: &str) -> Result<bool, Self::Error> {
        let sql = if self.inverse_edges {
            "SELECT EXISTS(SELECT 1 FROM edges
             WHERE head = ?1 OR (tail = ?1 AND substr(relation, 1, 1) <> '~'))"
        } else {
            "SELECT EXISTS(SELECT 1 FROM edges WHERE head = ?1)"
        };
        let exists: bool = self.conn.query_row(sql, params![entity], |row| row.get(0))?;
        Ok(exists)
    }
}
