//! Manual [`serde`] implementations.
//!
//! The wire layout is part of the persisted-scene format and must not drift
//! with struct definitions, so the core math types pin it by hand instead of
//! deriving:
//!
//! - [`Vector`] is an array of its components.
//! - [`Matrix`] is an array of its rows (row-major, matching storage).
//! - [`Quat`] is the array `[x, y, z, w]`.
//! - [`Affine3`] is the pair `[m, v]`.
//! - [`BBox`] is the pair `[min, max]`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Affine3, BBox, Matrix, Quat, Vector};

impl<T: Serialize, const N: usize> Serialize for Vector<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(N)?;
        for elem in &self.0 {
            tup.serialize_element(elem)?;
        }
        tup.end()
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for Vector<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VectorVisitor<T, const N: usize>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for VectorVisitor<T, N> {
            type Value = Vector<T, N>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an array of {N} numbers")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut elems = Vec::with_capacity(N);
                for i in 0..N {
                    match seq.next_element()? {
                        Some(elem) => elems.push(elem),
                        None => return Err(de::Error::invalid_length(i, &self)),
                    }
                }
                let array: [T; N] = elems
                    .try_into()
                    .map_err(|_| de::Error::invalid_length(N, &self))?;
                Ok(Vector(array))
            }
        }

        deserializer.deserialize_tuple(N, VectorVisitor(PhantomData))
    }
}

impl<T: Serialize, const R: usize, const C: usize> Serialize for Matrix<T, R, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // serde only implements `Serialize` for arrays of fixed lengths, so
        // a const-generic row needs to go through a wrapper.
        struct Row<'a, T, const C: usize>(&'a [T; C]);

        impl<'a, T: Serialize, const C: usize> Serialize for Row<'a, T, C> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut tup = serializer.serialize_tuple(C)?;
                for elem in self.0 {
                    tup.serialize_element(elem)?;
                }
                tup.end()
            }
        }

        let mut tup = serializer.serialize_tuple(R)?;
        for row in &self.0 {
            tup.serialize_element(&Row(row))?;
        }
        tup.end()
    }
}

impl<'de, T, const R: usize, const C: usize> Deserialize<'de> for Matrix<T, R, C>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MatrixVisitor<T, const R: usize, const C: usize>(PhantomData<T>);

        impl<'de, T, const R: usize, const C: usize> Visitor<'de> for MatrixVisitor<T, R, C>
        where
            T: Deserialize<'de>,
        {
            type Value = Matrix<T, R, C>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an array of {R} rows of {C} numbers")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut rows = Vec::with_capacity(R);
                for i in 0..R {
                    match seq.next_element::<Vector<T, C>>()? {
                        Some(row) => rows.push(row.into_array()),
                        None => return Err(de::Error::invalid_length(i, &self)),
                    }
                }
                let rows: [[T; C]; R] = rows
                    .try_into()
                    .map_err(|_| de::Error::invalid_length(R, &self))?;
                Ok(Matrix(rows))
            }
        }

        deserializer.deserialize_tuple(R, MatrixVisitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for Quat<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.vec.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Quat<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            vec: Vector::deserialize(deserializer)?,
        })
    }
}

impl<T: Serialize> Serialize for Affine3<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.m)?;
        tup.serialize_element(&self.v)?;
        tup.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Affine3<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AffineVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for AffineVisitor<T> {
            type Value = Affine3<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a matrix-translation pair")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let m = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let v = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                Ok(Affine3 { m, v })
            }
        }

        deserializer.deserialize_tuple(2, AffineVisitor(PhantomData))
    }
}

impl<T: Serialize, const N: usize> Serialize for BBox<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.min)?;
        tup.serialize_element(&self.max)?;
        tup.end()
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for BBox<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BBoxVisitor<T, const N: usize>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for BBoxVisitor<T, N> {
            type Value = BBox<T, N>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a min-max corner pair")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let min = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let max = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                Ok(BBox { min, max })
            }
        }

        deserializer.deserialize_tuple(2, BBoxVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::{vec2, vec3, Affine3, BBox2, Mat3, Matrix, Quat, TransformKind, Vec3};

    type Quatd = Quat<f64>;

    #[test]
    fn vector_layout() {
        let v = vec3(1.0, 2.0, 3.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0]");
        assert_eq!(serde_json::from_str::<Vec3<f64>>(&json).unwrap(), v);

        assert!(serde_json::from_str::<Vec3<f64>>("[1.0,2.0]").is_err());
    }

    #[test]
    fn matrix_layout() {
        // Rows in writing order, matching storage.
        let m = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1.0,2.0],[3.0,4.0]]");
        assert_eq!(
            serde_json::from_str::<Matrix<f64, 2, 2>>(&json).unwrap(),
            m
        );

        // Non-square matrices serialize row by row too.
        let m = Matrix::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1.0,2.0,3.0],[4.0,5.0,6.0]]");
        assert_eq!(
            serde_json::from_str::<Matrix<f64, 2, 3>>(&json).unwrap(),
            m
        );
    }

    #[test]
    fn quat_layout() {
        let q = Quatd::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        assert_eq!(serde_json::from_str::<Quatd>(&json).unwrap(), q);
    }

    #[test]
    fn affine_layout() {
        let t = Affine3::from_translation(vec3(1.0, 2.0, 3.0));
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(
            json,
            "[[[1.0,0.0,0.0],[0.0,1.0,0.0],[0.0,0.0,1.0]],[1.0,2.0,3.0]]"
        );
        assert_eq!(serde_json::from_str::<Affine3<f64>>(&json).unwrap(), t);
    }

    #[test]
    fn bbox_layout() {
        let bbox = BBox2::new(vec2(0.0, 1.0), vec2(2.0, 3.0));
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[[0.0,1.0],[2.0,3.0]]");
        assert_eq!(serde_json::from_str::<BBox2<f64>>(&json).unwrap(), bbox);
    }

    #[test]
    fn enums_as_names() {
        assert_eq!(
            serde_json::to_string(&TransformKind::ScaleTranslation).unwrap(),
            "\"ScaleTranslation\""
        );
    }

    #[test]
    fn rotation_survives_round_trip() {
        let m = Mat3::rotation_xyz(vec3(0.25, -1.0, 2.0));
        let json = serde_json::to_string(&m).unwrap();
        let back: Mat3<f64> = serde_json::from_str(&json).unwrap();
        // Exact: the components pass through untouched.
        assert_eq!(back, m);
    }
}
